//! One-line status notices for operations without a resource to show.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Notice,
    Failure,
}

/// A short message prefixed by its level.
pub struct OperationStatus {
    pub message: String,
    level: Level,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_level(message, Level::Success)
    }

    /// Nothing went wrong, but nothing was found or changed either.
    pub fn notice(message: impl Into<String>) -> Self {
        Self::with_level(message, Level::Notice)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::with_level(message, Level::Failure)
    }

    fn with_level(message: impl Into<String>, level: Level) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.level == Level::Failure
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.level {
            Level::Success => "Success:",
            Level::Notice => "Note:",
            Level::Failure => "Error:",
        };
        writeln!(f, "{prefix} {}", self.message)
    }
}
