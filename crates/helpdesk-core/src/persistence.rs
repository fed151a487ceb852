//! The durable-store collaborator.
//!
//! The engines never call a store themselves. The [`crate::Helpdesk`] façade
//! hands snapshots to a [`Persistence`] implementation after the in-memory
//! change is done, from a blocking task, and only logs what comes back.

use std::path::{Path, PathBuf};

use crate::{
    db::Database,
    error::Result,
    models::{FeedbackRecord, Plan},
};

/// Storage for feedback counters and plan snapshots.
///
/// Implementations are called from `spawn_blocking` and may block.
pub trait Persistence: Send + Sync {
    /// Adds one outcome report to a solution's stored counters.
    fn persist_feedback(&self, solution_id: u64, success: bool) -> Result<()>;

    /// Stores the current state of a plan and its steps. A snapshot older
    /// than the stored one (by `Plan::revision`) must not replace it.
    fn persist_plan(&self, plan: &Plan) -> Result<()>;

    /// Counters for every solution that ever received feedback.
    fn load_all_feedback(&self) -> Result<Vec<FeedbackRecord>>;

    /// Every stored plan, in id order.
    fn load_all_plans(&self) -> Result<Vec<Plan>>;
}

/// [`Persistence`] over a SQLite file. Each call opens its own connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Opens the database once to create the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        Database::new(&path)?;
        Ok(Self { path })
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for SqliteStore {
    fn persist_feedback(&self, solution_id: u64, success: bool) -> Result<()> {
        Database::new(&self.path)?.record_feedback(solution_id, success)
    }

    fn persist_plan(&self, plan: &Plan) -> Result<()> {
        Database::new(&self.path)?.save_plan(plan)?;
        Ok(())
    }

    fn load_all_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        Database::new(&self.path)?.load_feedback()
    }

    fn load_all_plans(&self) -> Result<Vec<Plan>> {
        Database::new(&self.path)?.load_plans()
    }
}
