//! High-level helpdesk API.
//!
//! [`Helpdesk`] owns the three engines and the persistence collaborator and
//! is the only handle callers need. It is built once at startup by
//! [`HelpdeskBuilder`] and shared by reference (or behind an `Arc`) with
//! every request handler; there is no global state.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
//! │   Helpdesk   │───▶│  KnowledgeStore  │    │              │
//! │   (async)    │───▶│  TaskCatalog     │    │  Persistence │
//! │              │───▶│  TaskPlanEngine  │    │  (blocking)  │
//! │              │──────────────────────────▶│              │
//! └──────────────┘    └──────────────────┘    └──────────────┘
//! ```
//!
//! Engine calls are short in-memory operations. Whenever one changes state,
//! the façade then hands a snapshot to the store from a blocking task, after
//! every engine lock has been released. Store failures are logged and
//! otherwise ignored: the in-memory change stands.
//!
//! # Usage
//!
//! ```rust
//! use helpdesk_core::{
//!     params::{CreateFromMessage, Id, StepRef},
//!     HelpdeskBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let helpdesk = HelpdeskBuilder::new()
//!     .with_database_path(Some("/tmp/helpdesk.db"))
//!     .build()
//!     .await?;
//!
//! let plan = helpdesk
//!     .create_plan_from_message(&CreateFromMessage {
//!         session_id: "session-1".to_string(),
//!         message: "My printer is offline".to_string(),
//!     })
//!     .await?
//!     .expect("a printer template exists");
//!
//! let plan = helpdesk.start_plan(&Id { id: plan.id }).await?;
//! let step_id = plan.current_step().map(|step| step.id).unwrap_or_default();
//! helpdesk
//!     .complete_step(&StepRef { plan_id: plan.id, step_id })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use log::warn;
use tokio::task;

use crate::{
    engine::TaskPlanEngine,
    error::{HelpdeskError, Result},
    knowledge::KnowledgeStore,
    models::Plan,
    persistence::Persistence,
    task_catalog::TaskCatalog,
};

pub mod builder;
pub mod knowledge_ops;
pub mod plan_ops;
pub mod step_ops;

#[cfg(test)]
mod tests;

pub use builder::HelpdeskBuilder;

/// Main helpdesk interface.
pub struct Helpdesk {
    pub(crate) knowledge: Arc<KnowledgeStore>,
    pub(crate) templates: Arc<TaskCatalog>,
    pub(crate) plans: TaskPlanEngine,
    pub(crate) store: Option<Arc<dyn Persistence>>,
}

impl Helpdesk {
    pub(crate) fn new(
        knowledge: KnowledgeStore,
        templates: TaskCatalog,
        plans: TaskPlanEngine,
        store: Option<Arc<dyn Persistence>>,
    ) -> Self {
        Self {
            knowledge: Arc::new(knowledge),
            templates: Arc::new(templates),
            plans,
            store,
        }
    }

    /// True when state changes are written to a store.
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Runs a store write on the blocking pool and logs its failure.
    async fn persist<F>(&self, what: String, write: F)
    where
        F: FnOnce(&dyn Persistence) -> Result<()> + Send + 'static,
    {
        let Some(store) = self.store.clone() else {
            return;
        };

        let outcome = match task::spawn_blocking(move || write(store.as_ref())).await {
            Ok(result) => result,
            Err(e) => Err(HelpdeskError::join(e)),
        };

        if let Err(e) = outcome {
            warn!("Failed to persist {what}: {e}");
        }
    }

    async fn persist_plan(&self, plan: &Plan) {
        let snapshot = plan.clone();
        self.persist(format!("plan {}", plan.id), move |store| {
            store.persist_plan(&snapshot)
        })
        .await;
    }
}
