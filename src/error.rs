//! Error types for the content cache
//!
//! Cache lookups never fail; absence is `None`. Errors exist only for
//! inputs that must be validated up front: invalidation patterns and
//! configuration.

use thiserror::Error;

// == Cache Error Enum ==
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalidation pattern failed to compile
    #[error("Invalid key pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the content cache.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_from_regex_error() {
        let err: CacheError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, CacheError::InvalidPattern(_)));
        assert!(err.to_string().starts_with("Invalid key pattern"));
    }

    #[test]
    fn test_invalid_config_message() {
        let err = CacheError::InvalidConfig("capacity must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be at least 1"
        );
    }
}
