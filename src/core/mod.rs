//! Core functionality for the rate limiter
//!
//! This module contains the limiter algorithms and the per-key registry.

pub mod rate_limiter; // Rate limiting algorithms
