//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the user store.
///
/// Every variant leaves the store file untouched except `Io`, where the
/// file is in whatever state the failed write primitive left it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// File content is not valid JSON or its root is not an array
    #[error("Parse error: {0}")]
    Parse(String),

    /// No record carries the requested id
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Underlying read or write failure
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Parse(_) => 500,
            StoreError::NotFound(_) => 404,
            StoreError::Io(_) => 500,
            StoreError::Internal(_) => 500,
        }
    }

    /// Stable error code string used in logs and CLI output
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Parse(_) => "USERSTORE_PARSE_ERROR",
            StoreError::NotFound(_) => "USERSTORE_NOT_FOUND",
            StoreError::Io(_) => "USERSTORE_IO_ERROR",
            StoreError::Internal(_) => "USERSTORE_INTERNAL_ERROR",
        }
    }

    pub(crate) fn io(context: impl std::fmt::Display, err: std::io::Error) -> Self {
        StoreError::Io(format!("{}: {}", context, err))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(StoreError::NotFound("abc".into()).status_code(), 404);
        assert_eq!(StoreError::Parse("bad".into()).status_code(), 500);
        assert_eq!(StoreError::Io("disk".into()).status_code(), 500);
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(StoreError::Parse(String::new()).code(), "USERSTORE_PARSE_ERROR");
        assert_eq!(StoreError::NotFound(String::new()).code(), "USERSTORE_NOT_FOUND");
        assert_eq!(StoreError::Io(String::new()).code(), "USERSTORE_IO_ERROR");
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let err: StoreError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_io_error_keeps_context() {
        let err = StoreError::io(
            "Failed to read usuarios.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("usuarios.json"));
        assert!(display.contains("denied"));
    }
}
