//! Error types for Keel Stone Pathfinder.

/// Top-level error type for the service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persistence errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Failures of a single intake submission.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// Missing or malformed assessment fields.
    #[error("{message}")]
    Validation {
        message: String,
        /// Required fields that were absent or empty, in declaration order.
        required: Vec<&'static str>,
        /// Fields that were present but of the wrong type or an unknown value.
        invalid: Vec<&'static str>,
    },

    #[error("Method {method} not allowed")]
    MethodNotAllowed { method: String },

    #[error("{0}")]
    Internal(String),
}

impl From<DatabaseError> for IntakeError {
    fn from(e: DatabaseError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Failures of progress recording and lookup.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("{message}")]
    Validation {
        message: String,
        required: Vec<&'static str>,
    },

    #[error("Day {day} is outside the plan (1..={max})")]
    DayOutOfRange { day: i64, max: u32 },

    #[error("{0}")]
    Internal(String),
}

impl From<DatabaseError> for ProgressError {
    fn from(e: DatabaseError) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Result type alias for the service.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_error_becomes_internal_intake_error() {
        let err: IntakeError = DatabaseError::Query("disk full".into()).into();
        match err {
            IntakeError::Internal(msg) => assert!(msg.contains("disk full")),
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn validation_error_displays_message() {
        let err = IntakeError::Validation {
            message: "Missing required fields: email".into(),
            required: vec!["email"],
            invalid: vec![],
        };
        assert_eq!(err.to_string(), "Missing required fields: email");
    }

    #[test]
    fn top_level_error_wraps_config() {
        let err: Error = ConfigError::InvalidValue {
            key: "PATHFINDER_PORT".into(),
            message: "not a number".into(),
        }
        .into();
        assert!(err.to_string().contains("PATHFINDER_PORT"));
    }

    #[test]
    fn top_level_error_wraps_database() {
        let err: Error = DatabaseError::Migration("V2 failed".into()).into();
        assert!(matches!(err, Error::Database(_)));
        assert!(err.to_string().contains("V2 failed"));
    }
}
