//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{PlanStatus, Progress, Step, StepStatus};

/// Represents a complete plan with metadata and its owned steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Support session the plan belongs to
    pub session_id: String,

    /// Title of the plan
    pub title: String,

    /// Detailed description of the problem the plan addresses
    pub description: String,

    /// Template the plan was instantiated from, if any
    #[serde(default)]
    pub template_id: Option<u64>,

    /// Lifecycle status of the plan
    #[serde(default)]
    pub status: PlanStatus,

    /// Ordered steps; `steps[i].order == i + 1`
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was started (UTC)
    #[serde(default)]
    pub started_at: Option<Timestamp>,

    /// Timestamp when the last step finished the plan (UTC)
    #[serde(default)]
    pub completed_at: Option<Timestamp>,

    /// Bumped by every state change; stores keep the highest revision
    #[serde(default)]
    pub revision: u64,
}

impl Plan {
    /// The step the user should be working on: the in-progress step, or the
    /// first pending one when nothing is in progress.
    pub fn current_step(&self) -> Option<&Step> {
        self.steps
            .iter()
            .find(|step| step.status == StepStatus::InProgress)
            .or_else(|| {
                self.steps
                    .iter()
                    .find(|step| step.status == StepStatus::Pending)
            })
    }

    /// Step counts per status.
    pub fn progress(&self) -> Progress {
        Progress::of(&self.steps)
    }

    /// Position of a step of this plan in `steps`.
    pub fn step_index(&self, step_id: u64) -> Option<usize> {
        self.steps.iter().position(|step| step.id == step_id)
    }

    /// Looks up one of this plan's steps.
    pub fn step(&self, step_id: u64) -> Option<&Step> {
        self.steps.iter().find(|step| step.id == step_id)
    }
}
