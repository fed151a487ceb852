//! Error types for the helpdesk library.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all helpdesk operations.
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// Step not found within the given plan
    #[error("Step with ID {id} not found in plan {plan_id}")]
    StepNotFound { plan_id: u64, id: u64 },
    /// Knowledge base solution not found
    #[error("Solution with ID {id} not found")]
    SolutionNotFound { id: u64 },
    /// Knowledge base problem not found
    #[error("Problem with ID {id} not found")]
    ProblemNotFound { id: u64 },
    /// Task template not found
    #[error("Template with ID {id} not found")]
    TemplateNotFound { id: u64 },
    /// A lifecycle transition that the state machine does not allow
    #[error("Cannot {action} {entity} {id} while it is {from}")]
    InvalidTransition {
        entity: &'static str,
        id: u64,
        from: String,
        action: &'static str,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> HelpdeskError {
        HelpdeskError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> HelpdeskError {
        HelpdeskError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl HelpdeskError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        HelpdeskError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// True for the "unknown identity" family of errors.
    ///
    /// Callers at the transport edge usually map these to a 404-style answer,
    /// and [`HelpdeskError::InvalidTransition`] to a "cannot apply" answer.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            HelpdeskError::PlanNotFound { .. }
                | HelpdeskError::StepNotFound { .. }
                | HelpdeskError::SolutionNotFound { .. }
                | HelpdeskError::ProblemNotFound { .. }
                | HelpdeskError::TemplateNotFound { .. }
        )
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| HelpdeskError::database(message).with_source(e))
    }
}

/// Result type alias for helpdesk operations
pub type Result<T> = std::result::Result<T, HelpdeskError>;
