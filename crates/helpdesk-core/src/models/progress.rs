//! Progress snapshot of a plan's steps.

use serde::{Deserialize, Serialize};

use super::{Step, StepStatus};

/// Counts of steps per status plus the completion percentage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    pub total: u32,
    pub completed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub pending: u32,
    pub in_progress: u32,
    /// `floor(100 * completed / total)`, 0 for an empty plan. Skipped steps
    /// do not count as completed.
    pub percent: u32,
}

impl Progress {
    /// Tally the given steps.
    pub fn of(steps: &[Step]) -> Self {
        let mut progress = Progress {
            total: steps.len() as u32,
            ..Default::default()
        };

        for step in steps {
            match step.status {
                StepStatus::Pending => progress.pending += 1,
                StepStatus::InProgress => progress.in_progress += 1,
                StepStatus::Completed => progress.completed += 1,
                StepStatus::Failed => progress.failed += 1,
                StepStatus::Skipped => progress.skipped += 1,
            }
        }

        if progress.total > 0 {
            progress.percent = progress.completed * 100 / progress.total;
        }
        progress
    }
}
