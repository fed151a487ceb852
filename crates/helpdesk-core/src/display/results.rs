//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Plan, Solution};

/// A newly created resource, headed by its ID.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// A resource after a lifecycle change, headed by a one-line summary of
/// what happened (e.g. "Started plan 3").
pub struct UpdateResult<T> {
    pub resource: T,
    pub headline: String,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T, headline: impl Into<String>) -> Self {
        Self {
            resource,
            headline: headline.into(),
        }
    }
}

impl fmt::Display for UpdateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Confirmation of a feedback report with the solution's new counters.
pub struct FeedbackResult {
    pub solution: Solution,
    pub success: bool,
}

impl fmt::Display for FeedbackResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.success { "worked" } else { "did not work" };
        writeln!(f, "Recorded that solution {} {outcome}.", self.solution.id)?;
        writeln!(f)?;
        write!(f, "{}", self.solution)
    }
}
