//! Step model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::StepStatus;

/// Represents an individual step within a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the parent plan
    pub plan_id: u64,

    /// Position of the step within the plan (1-based, contiguous)
    pub order: u32,

    /// Brief title/summary of the step
    pub title: String,

    /// What the user has to do for this step
    pub description: String,

    /// Current status of the step
    #[serde(default)]
    pub status: StepStatus,

    /// Reason reported when the step failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// When the step became the current step
    #[serde(default)]
    pub started_at: Option<Timestamp>,

    /// When the step was completed, failed or skipped
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

/// Title/description pair a plan step is instantiated from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepBlueprint {
    pub title: String,
    pub description: String,
}

impl StepBlueprint {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}
