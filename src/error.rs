//! Error taxonomy shared by the store, its backends and both bindings

use thiserror::Error;

/// Result type for archive operations
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Every store operation fails with exactly one of these kinds
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Bad or missing field, unknown enum value, non-positive limit
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The referenced id does not exist
    #[error("event {0} not found")]
    NotFound(u64),

    /// Persistence backend unavailable or inconsistent
    #[error("storage error: {0}")]
    Storage(String),
}

impl ArchiveError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ArchiveError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ArchiveError::Storage(message.into())
    }

    /// Stable machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            ArchiveError::Validation { .. } => "VALIDATION_ERROR",
            ArchiveError::NotFound(_) => "NOT_FOUND",
            ArchiveError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Offending field for validation failures
    pub fn field(&self) -> Option<&str> {
        match self {
            ArchiveError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ArchiveError {
    fn from(e: std::io::Error) -> Self {
        ArchiveError::Storage(format!("io: {}", e))
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(e: serde_json::Error) -> Self {
        ArchiveError::Storage(format!("json: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let v = ArchiveError::validation("title", "must not be empty");
        let n = ArchiveError::NotFound(7);
        let s = ArchiveError::storage("disk gone");

        assert_eq!(v.code(), "VALIDATION_ERROR");
        assert_eq!(n.code(), "NOT_FOUND");
        assert_eq!(s.code(), "STORAGE_ERROR");
        assert_eq!(v.field(), Some("title"));
        assert_eq!(n.field(), None);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ArchiveError::validation("title", "must not be empty").to_string(),
            "invalid title: must not be empty"
        );
        assert_eq!(ArchiveError::NotFound(3).to_string(), "event 3 not found");
    }

    #[test]
    fn test_io_errors_become_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(ArchiveError::from(io), ArchiveError::Storage(_)));
    }
}
