//! Error handling utilities for daylog.
//!
//! The boundary taxonomy has three shapes that callers branch on:
//!
//! - [`ValidationError`]: malformed or out-of-range input, raised before any
//!   remote call is attempted.
//! - [`StorageError`]: any backend failure, tagged with the failing
//!   [`Operation`] and carrying the original [`BackendError`] as its source.
//! - [`NotFoundError`]: a specific resource (a day log on delete, an entry by
//!   id) does not exist.
//!
//! All of them, plus configuration and I/O failures, are unified under
//! [`AppError`] with the [`AppResult`] alias.

use std::fmt;
use std::io;
use thiserror::Error;

/// Names every operation of the persistence contract.
///
/// Used as the stable tag on [`StorageError`] so callers can branch on which
/// step failed without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetDay,
    SaveDay,
    DeleteDay,
    CreateEntry,
    UpdateEntry,
    DeleteEntry,
    GetEntry,
    SearchLogs,
    GetDateRange,
    ListDays,
    GetStats,
    GenerateSummary,
    SaveSummary,
    Backup,
    HealthCheck,
}

impl Operation {
    /// Returns the operation name as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetDay => "GetDay",
            Operation::SaveDay => "SaveDay",
            Operation::DeleteDay => "DeleteDay",
            Operation::CreateEntry => "CreateEntry",
            Operation::UpdateEntry => "UpdateEntry",
            Operation::DeleteEntry => "DeleteEntry",
            Operation::GetEntry => "GetEntry",
            Operation::SearchLogs => "SearchLogs",
            Operation::GetDateRange => "GetDateRange",
            Operation::ListDays => "ListDays",
            Operation::GetStats => "GetStats",
            Operation::GenerateSummary => "GenerateSummary",
            Operation::SaveSummary => "SaveSummary",
            Operation::Backup => "Backup",
            Operation::HealthCheck => "HealthCheck",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures reported by an object store backend.
///
/// # Examples
///
/// ```
/// use daylog::errors::BackendError;
///
/// let error = BackendError::Conflict { key: "daily-logs/2025/10/2025-10-01.json".to_string() };
/// assert!(error.is_conflict());
/// assert!(format!("{}", error).contains("changed since it was read"));
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The object does not exist.
    #[error("Object not found: {key}")]
    NotFound {
        /// Key of the missing object
        key: String,
    },

    /// The version token supplied with a write is stale.
    #[error("Object {key} changed since it was read; the write was rejected")]
    Conflict {
        /// Key of the contended object
        key: String,
    },

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The backend answered with an unexpected status.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The backend answered with a payload that could not be understood.
    #[error("Invalid response from object store: {0}")]
    InvalidResponse(String),

    /// Day-log JSON could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failed (backup archives).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl BackendError {
    /// Returns true for the "object does not exist" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }

    /// Returns true when a versioned write was rejected as stale.
    pub fn is_conflict(&self) -> bool {
        matches!(self, BackendError::Conflict { .. })
    }
}

/// Malformed or out-of-range input.
///
/// # Examples
///
/// ```
/// use daylog::errors::ValidationError;
///
/// let error = ValidationError::new("status", "must be between 1 and 10");
/// assert_eq!(format!("{}", error), "status: must be between 1 and 10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// The offending input field
    pub field: String,
    /// What is wrong with it
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A backend failure wrapped with the failing operation.
#[derive(Debug, Error)]
#[error("{operation}: {message}")]
pub struct StorageError {
    /// Contract operation that failed
    pub operation: Operation,
    /// Human readable description
    pub message: String,
    /// Root cause, preserved for diagnostics
    #[source]
    pub cause: Option<BackendError>,
}

impl StorageError {
    /// Creates a storage error without an underlying cause.
    pub fn new(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a storage error wrapping a backend cause.
    pub fn with_cause(operation: Operation, message: impl Into<String>, cause: BackendError) -> Self {
        Self {
            operation,
            message: message.into(),
            cause: Some(cause),
        }
    }

    /// Returns true when the root cause is an optimistic concurrency conflict.
    pub fn is_conflict(&self) -> bool {
        self.cause.as_ref().is_some_and(BackendError::is_conflict)
    }
}

/// A specific resource does not exist.
///
/// # Examples
///
/// ```
/// use daylog::errors::NotFoundError;
///
/// let error = NotFoundError::new("log entry", "entry_42");
/// assert_eq!(format!("{}", error), "log entry not found: entry_42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{resource} not found: {id}")]
pub struct NotFoundError {
    /// Kind of resource, e.g. "day log" or "log entry"
    pub resource: String,
    /// Identifier that was looked up
    pub id: String,
}

impl NotFoundError {
    pub fn new(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            id: id.into(),
        }
    }
}

/// Represents all possible errors that can occur in daylog.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` or `reqwest::Error` values.
///
/// # Examples
///
/// ```
/// use daylog::errors::{AppError, NotFoundError};
///
/// let error: AppError = NotFoundError::new("day log", "2025-10-01").into();
/// assert!(error.is_not_found());
/// assert_eq!(format!("{}", error), "day log not found: 2025-10-01");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backend failure, tagged with the failing operation.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The requested resource does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Input/output errors from local filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    /// Returns true for "does not exist" failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    /// Returns true for input that was rejected before any remote call.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Returns true for backend failures.
    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Storage(_))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use daylog::errors::{AppResult, ValidationError};
///
/// fn might_fail(title: &str) -> AppResult<String> {
///     if title.is_empty() {
///         return Err(ValidationError::new("title", "must not be empty").into());
///     }
///     Ok(title.to_string())
/// }
///
/// assert!(might_fail("").is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;
