//! Error handling utilities
//!
//! This module defines the error type returned by limiters, configuration
//! loading and the demo.

pub mod error;

pub use error::*;
