//! Core library for the Helpdesk troubleshooting assistant.
//!
//! The crate bundles three engines behind one async façade:
//!
//! - **Knowledge base** ([`knowledge`]): problems with ranked solutions and
//!   success/failure feedback
//! - **Task templates** ([`task_catalog`]): reusable step sequences detected
//!   from a user's message
//! - **Task plans** ([`engine`]): per-session plans whose steps move through
//!   an explicit state machine
//!
//! [`Helpdesk`] ties them together, persists feedback and plan changes
//! through a [`Persistence`] store (SQLite by default) and restores them on
//! startup. Models render as markdown through [`std::fmt::Display`], with
//! list and result wrappers in [`display`].
//!
//! # Quick Start
//!
//! ```rust
//! use helpdesk_core::{display::SearchResults, params::SearchKnowledge, HelpdeskBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // In-memory only: nothing is written to disk
//! let helpdesk = HelpdeskBuilder::new().without_persistence().build().await?;
//!
//! let hits = helpdesk
//!     .search(&SearchKnowledge {
//!         query: "printer offline".to_string(),
//!         category: None,
//!     })
//!     .await;
//! println!("{}", SearchResults(hits));
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod helpdesk;
pub mod knowledge;
pub mod models;
pub mod params;
pub mod persistence;
pub mod scoring;
pub mod task_catalog;

pub use catalog::Catalog;
pub use db::Database;
pub use display::{
    Categories, CreateResult, FeedbackResult, LocalDateTime, OperationStatus, Plans,
    QuickSolutionList, SearchResults, Templates, UpdateResult,
};
pub use engine::TaskPlanEngine;
pub use error::{HelpdeskError, Result};
pub use helpdesk::{Helpdesk, HelpdeskBuilder};
pub use knowledge::KnowledgeStore;
pub use models::{
    InteractionContext, KnowledgeContext, Plan, PlanStatus, Problem, Progress, RankedSolution,
    ScoredProblem, SessionTaskContext, Solution, Step, StepBlueprint, StepStatus,
    StepTransition, Template, TemplateMatch,
};
pub use persistence::{Persistence, SqliteStore};
pub use task_catalog::TaskCatalog;
