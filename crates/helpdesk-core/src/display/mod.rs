//! Markdown rendering for helpdesk models and operation results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Lists and operation outcomes get newtype wrappers so the CLI can print
//! any result with a single `format!`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Markdown      │
//! │ (Plan, Problem) │───▶│ Result Types    │───▶│    Output       │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: list wrappers (Plans, SearchResults, QuickSolutionList,
//!   Templates, Categories)
//! - [`context`]: knowledge, session and interaction context snapshots
//! - [`results`]: operation outcomes (CreateResult, UpdateResult,
//!   FeedbackResult)
//! - [`status`]: one-line status notices (OperationStatus)
//! - [`datetime`]: local time and elapsed time formatting
//! - [`models`]: Display implementations for domain models
//!
//! ## Example
//!
//! ```rust
//! use helpdesk_core::{
//!     display::{CreateResult, UpdateResult},
//!     models::{Plan, PlanStatus},
//! };
//! use jiff::Timestamp;
//!
//! let plan = Plan {
//!     id: 1,
//!     session_id: "session-1".to_string(),
//!     title: "Fix Printer Offline".to_string(),
//!     description: "Printer shows as offline".to_string(),
//!     template_id: Some(1),
//!     status: PlanStatus::Created,
//!     steps: vec![],
//!     created_at: Timestamp::now(),
//!     started_at: None,
//!     completed_at: None,
//!     revision: 0,
//! };
//!
//! let output = CreateResult::new(plan.clone()).to_string();
//! assert!(output.contains("Created plan with ID: 1"));
//!
//! let output = UpdateResult::new(plan, "Started plan 1").to_string();
//! assert!(output.starts_with("Started plan 1"));
//! ```

pub mod collections;
pub mod context;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Categories, Plans, QuickSolutionList, SearchResults, Templates};
pub use datetime::{Elapsed, LocalDateTime};
pub use results::{CreateResult, FeedbackResult, UpdateResult};
pub use status::OperationStatus;
