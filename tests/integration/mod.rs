//! Integration tests for rate-limiter-rs
//!
//! These tests go through the public API only and use real limiters,
//! driven by explicit readings or a manual clock.

pub mod config_tests;
pub mod contract_tests;
pub mod demo_tests;
pub mod keyed_tests;
pub mod scenario_tests;
