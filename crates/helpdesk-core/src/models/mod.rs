//! Data models for the knowledge base, task templates and task plans.
//!
//! Display implementations for these models are located in
//! [`crate::display::models`] so data structures stay separate from
//! presentation logic.
//!
//! # Examples
//!
//! ```rust
//! use helpdesk_core::models::{Plan, PlanStatus, Step, StepStatus};
//! use jiff::Timestamp;
//!
//! let plan = Plan {
//!     id: 1,
//!     session_id: "session-1".to_string(),
//!     title: "Fix Printer Offline".to_string(),
//!     description: "Printer shows as offline".to_string(),
//!     template_id: None,
//!     status: PlanStatus::InProgress,
//!     steps: vec![Step {
//!         id: 1,
//!         plan_id: 1,
//!         order: 1,
//!         title: "Restart Printer".to_string(),
//!         description: "Power cycle the printer".to_string(),
//!         status: StepStatus::InProgress,
//!         error_message: None,
//!         started_at: Some(Timestamp::now()),
//!         completed_at: None,
//!     }],
//!     created_at: Timestamp::now(),
//!     started_at: Some(Timestamp::now()),
//!     completed_at: None,
//!     revision: 0,
//! };
//!
//! assert_eq!(plan.current_step().map(|s| s.id), Some(1));
//! assert_eq!(plan.progress().in_progress, 1);
//! ```

pub mod context;
pub mod knowledge;
pub mod plan;
pub mod progress;
pub mod status;
pub mod step;
pub mod template;


pub use context::{
    InteractionContext, KnowledgeContext, PlanBrief, SessionTaskContext, StepTransition,
};
pub use knowledge::{
    FeedbackRecord, FeedbackTally, Problem, RankedSolution, ScoredProblem, Solution,
};
pub use plan::Plan;
pub use progress::Progress;
pub use status::{PlanEvent, PlanStatus, StepEvent, StepStatus};
pub use step::{Step, StepBlueprint};
pub use template::{Template, TemplateMatch};
