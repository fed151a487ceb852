//! Parameter structures for helpdesk operations.
//!
//! These are the request shapes shared by every caller of the
//! [`crate::Helpdesk`] façade. They carry no framework derives beyond serde;
//! interface layers wrap them (clap arguments in the CLI, for instance) and
//! convert with `From`.
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct FeedbackArgs {
//!     pub solution_id: u64,
//!     #[arg(long)]
//!     pub failed: bool,
//! }
//!
//! impl From<FeedbackArgs> for RecordFeedback {
//!     fn from(args: FeedbackArgs) -> Self {
//!         RecordFeedback {
//!             solution_id: args.solution_id,
//!             success: !args.failed,
//!         }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    knowledge::{QUICK_MIN_SUCCESS_RATE, QUICK_MIN_USES},
    models::StepBlueprint,
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for operations scoped to one support session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
}

/// Parameters for a knowledge base search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchKnowledge {
    /// Free-text query
    pub query: String,
    /// Only search problems of this category (case-insensitive)
    #[serde(default)]
    pub category: Option<String>,
}

/// Parameters for reporting whether a solution worked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordFeedback {
    pub solution_id: u64,
    pub success: bool,
}

/// Thresholds for the quick-solutions list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickSolutions {
    /// Lowest success rate, between 0 and 1
    #[serde(default = "default_min_success_rate")]
    pub min_success_rate: f64,
    /// Lowest number of feedback reports
    #[serde(default = "default_min_uses")]
    pub min_uses: u64,
}

fn default_min_success_rate() -> f64 {
    QUICK_MIN_SUCCESS_RATE
}

fn default_min_uses() -> u64 {
    QUICK_MIN_USES
}

impl Default for QuickSolutions {
    fn default() -> Self {
        Self {
            min_success_rate: QUICK_MIN_SUCCESS_RATE,
            min_uses: QUICK_MIN_USES,
        }
    }
}

/// Parameters for creating a plan from an explicit step list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Session the plan belongs to
    pub session_id: String,
    /// Title of the plan (required)
    pub title: String,
    /// Description of the problem the plan addresses
    #[serde(default)]
    pub description: String,
    /// Steps in execution order
    #[serde(default)]
    pub steps: Vec<StepBlueprint>,
    /// Template the steps were taken from, if any
    #[serde(default)]
    pub template_id: Option<u64>,
}

/// Parameters for instantiating a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFromTemplate {
    pub session_id: String,
    pub template_id: u64,
}

/// Parameters for creating a plan from whatever template a message matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateFromMessage {
    pub session_id: String,
    pub message: String,
}

/// Identifies one step of one plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepRef {
    pub plan_id: u64,
    pub step_id: u64,
}

/// Parameters for failing a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FailStep {
    pub plan_id: u64,
    pub step_id: u64,
    /// What went wrong, shown to the user and stored with the step
    pub error_message: String,
}

/// Parameters for building the context of an inbound message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interaction {
    pub session_id: String,
    pub message: String,
}
