use thiserror::Error;

use crate::graph::PersonId;

/// Main error type for Kingraph
#[derive(Error, Debug)]
pub enum KingraphError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or out-of-range request input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A path node that appears in a relation but has no person row
    #[error("Person {0} is referenced by a relation but has no record")]
    MissingPerson(PersonId),
}

/// Convenient Result type using KingraphError
pub type Result<T> = std::result::Result<T, KingraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KingraphError::Validation("degrees out of range".to_string());
        assert!(err.to_string().contains("Invalid input"));
        assert!(err.to_string().contains("degrees out of range"));
    }

    #[test]
    fn test_error_from_rusqlite() {
        let rusqlite_err = rusqlite::Error::InvalidQuery;
        let err: KingraphError = rusqlite_err.into();
        assert!(matches!(err, KingraphError::Database(_)));
    }

    #[test]
    fn test_missing_person_names_id() {
        let err = KingraphError::MissingPerson(PersonId(42));
        assert!(err.to_string().contains("42"));
    }
}
