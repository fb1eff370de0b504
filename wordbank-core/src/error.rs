//! Error types for Wordbank operations

use thiserror::Error;

/// Request validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{field}' is blank")]
    Blank { field: String },

    #[error("Field '{field}' must be positive, got {value}")]
    NotPositive { field: String, value: i64 },
}

impl ValidationError {
    pub fn blank(field: impl Into<String>) -> Self {
        Self::Blank {
            field: field.into(),
        }
    }

    pub fn not_positive(field: impl Into<String>, value: i64) -> Self {
        Self::NotPositive {
            field: field.into(),
            value,
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::Blank { field } | Self::NotPositive { field, .. } => field,
        }
    }
}

/// Result-row decoding errors.
///
/// These mean a stored procedure returned something other than the shape
/// its caller expects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Column '{column}' is missing from the result row")]
    MissingColumn { column: String },

    #[error("Column '{column}' holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Column '{column}' value {value} does not fit in {target}")]
    OutOfRange {
        column: String,
        value: i64,
        target: &'static str,
    },
}

/// Errors raised by a [`crate::ProcedureGateway`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// Any failure reported by the database driver or its pool.
    #[error("{message}")]
    Database { message: String },

    /// The call's parameters do not match the procedure signature.
    #[error("Invalid parameters for {procedure}: {reason}")]
    Binding {
        procedure: &'static str,
        reason: String,
    },
}

impl GatewayError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
