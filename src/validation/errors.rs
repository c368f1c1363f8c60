//! # Validation Errors

use thiserror::Error;

/// Request body rejected before it reaches the store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}: {}", errors.join("; "))]
pub struct ValidationError {
    /// Summary, distinguishes raw-input failures from post-sanitization ones
    pub message: &'static str,
    /// One entry per failed rule
    pub errors: Vec<String>,
}

impl ValidationError {
    pub const INVALID: &'static str = "Invalid data";
    pub const INVALID_AFTER_SANITIZE: &'static str = "Invalid data after sanitization";

    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            message: Self::INVALID,
            errors,
        }
    }

    pub fn invalid_after_sanitize(errors: Vec<String>) -> Self {
        Self {
            message: Self::INVALID_AFTER_SANITIZE,
            errors,
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        400
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_error() {
        let err = ValidationError::invalid(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Invalid data: a; b");
        assert_eq!(err.status_code(), 400);
    }
}
