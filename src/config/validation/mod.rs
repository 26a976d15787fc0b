//! Configuration validation
//!
//! The validation is organized into several submodules:
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Top level, demo and logging validators
//! - `rate_limit_validators`: Rate limit validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod rate_limit_validators;
mod trait_def;

pub use trait_def::Validate;
