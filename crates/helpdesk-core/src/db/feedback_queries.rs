//! Solution feedback counters.

use jiff::Timestamp;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::FeedbackRecord,
};

const UPSERT_FEEDBACK_SQL: &str = "INSERT INTO kb_feedback (solution_id, success_count, failure_count, updated_at) VALUES (?1, ?2, ?3, ?4) ON CONFLICT(solution_id) DO UPDATE SET success_count = success_count + excluded.success_count, failure_count = failure_count + excluded.failure_count, updated_at = excluded.updated_at";
const SELECT_FEEDBACK_SQL: &str =
    "SELECT solution_id, success_count, failure_count FROM kb_feedback ORDER BY solution_id";

impl super::Database {
    /// Adds one success or failure to a solution's stored counters.
    pub fn record_feedback(&mut self, solution_id: u64, success: bool) -> Result<()> {
        let (successes, failures) = if success { (1_i64, 0_i64) } else { (0, 1) };

        self.connection
            .execute(
                UPSERT_FEEDBACK_SQL,
                params![
                    solution_id as i64,
                    successes,
                    failures,
                    Timestamp::now().to_string()
                ],
            )
            .db_context("Failed to record feedback")?;
        Ok(())
    }

    /// Loads every stored counter pair.
    pub fn load_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_FEEDBACK_SQL)
            .db_context("Failed to prepare feedback query")?;

        let records = stmt
            .query_map([], |row| {
                Ok(FeedbackRecord {
                    solution_id: row.get::<_, i64>(0)? as u64,
                    success_count: row.get::<_, i64>(1)? as u64,
                    failure_count: row.get::<_, i64>(2)? as u64,
                })
            })
            .db_context("Failed to query feedback")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read feedback row")?;

        Ok(records)
    }
}
