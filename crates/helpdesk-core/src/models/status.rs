//! Status enumerations for plans and steps, and the transition tables that
//! govern them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan has been instantiated but not started
    #[default]
    Created,

    /// Plan is being worked through step by step
    InProgress,

    /// Every step was completed or skipped
    Completed,

    /// A step failed and the plan was aborted
    Failed,

    /// Plan was abandoned by the caller
    Cancelled,
}

/// Events that move a plan through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEvent {
    Start,
    Complete,
    Fail,
    Cancel,
}

impl PlanEvent {
    /// Verb used in transition error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanEvent::Start => "start",
            PlanEvent::Complete => "complete",
            PlanEvent::Fail => "fail",
            PlanEvent::Cancel => "cancel",
        }
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(PlanStatus::Created),
            "in_progress" | "inprogress" => Ok(PlanStatus::InProgress),
            "completed" => Ok(PlanStatus::Completed),
            "failed" => Ok(PlanStatus::Failed),
            "cancelled" => Ok(PlanStatus::Cancelled),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Created => "created",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Failed => "failed",
            PlanStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal plans never change status again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PlanStatus::Completed | PlanStatus::Failed | PlanStatus::Cancelled
        )
    }

    /// Returns the status reached by applying `event`, or `None` when the
    /// state machine has no such edge.
    ///
    /// ```text
    /// created ──start──▶ in_progress ──complete──▶ completed
    ///    │                   └────────fail──────▶ failed
    ///    └──────cancel──────┴───────cancel──────▶ cancelled
    /// ```
    pub fn next(self, event: PlanEvent) -> Option<PlanStatus> {
        match (self, event) {
            (PlanStatus::Created, PlanEvent::Start) => Some(PlanStatus::InProgress),
            (PlanStatus::InProgress, PlanEvent::Complete) => Some(PlanStatus::Completed),
            (PlanStatus::InProgress, PlanEvent::Fail) => Some(PlanStatus::Failed),
            (PlanStatus::Created | PlanStatus::InProgress, PlanEvent::Cancel) => {
                Some(PlanStatus::Cancelled)
            }
            _ => None,
        }
    }
}

/// Type-safe enumeration of step statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step has not been reached yet
    #[default]
    Pending,

    /// Step is the one the user is currently working on
    InProgress,

    /// Step was carried out
    Completed,

    /// Step could not be carried out
    Failed,

    /// Step was passed over
    Skipped,
}

/// Events that move a step through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEvent {
    Start,
    Complete,
    Fail,
    Skip,
    /// Put an in-progress step back to pending when its plan aborts
    /// elsewhere.
    Interrupt,
}

impl StepEvent {
    /// Verb used in transition error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepEvent::Start => "start",
            StepEvent::Complete => "complete",
            StepEvent::Fail => "fail",
            StepEvent::Skip => "skip",
            StepEvent::Interrupt => "interrupt",
        }
    }
}

impl FromStr for StepStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(StepStatus::Pending),
            "inprogress" | "in_progress" => Ok(StepStatus::InProgress),
            "completed" => Ok(StepStatus::Completed),
            "failed" => Ok(StepStatus::Failed),
            "skipped" => Ok(StepStatus::Skipped),
            _ => Err(format!("Invalid step status: {s}")),
        }
    }
}

impl StepStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepStatus::Pending => "pending",
            StepStatus::InProgress => "in_progress",
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        }
    }

    /// Completed, failed and skipped steps are finished.
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }

    /// Returns the status reached by applying `event`, or `None` when the
    /// step cannot take that edge.
    pub fn next(self, event: StepEvent) -> Option<StepStatus> {
        match (self, event) {
            (StepStatus::Pending, StepEvent::Start) => Some(StepStatus::InProgress),
            (StepStatus::InProgress, StepEvent::Complete) => Some(StepStatus::Completed),
            (StepStatus::InProgress, StepEvent::Skip) => Some(StepStatus::Skipped),
            (StepStatus::Pending | StepStatus::InProgress, StepEvent::Fail) => {
                Some(StepStatus::Failed)
            }
            (StepStatus::InProgress, StepEvent::Interrupt) => Some(StepStatus::Pending),
            _ => None,
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use helpdesk_core::models::StepStatus;
    ///
    /// assert_eq!(StepStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(StepStatus::InProgress.with_icon(), "➤ In Progress");
    /// assert_eq!(StepStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            StepStatus::Completed => "✓ Completed",
            StepStatus::InProgress => "➤ In Progress",
            StepStatus::Pending => "○ Pending",
            StepStatus::Failed => "✗ Failed",
            StepStatus::Skipped => "↷ Skipped",
        }
    }
}
