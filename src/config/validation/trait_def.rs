//! Validation trait definition

/// Validation trait for configuration structures.
///
/// Errors are plain messages; [`crate::config::Config::validate`] wraps them
/// into a configuration error naming the section.
pub trait Validate {
    /// Check the values of this section, returning the first problem found
    fn validate(&self) -> Result<(), String>;
}
