//! Plan snapshot storage.

use log::debug;
use rusqlite::{params, types::Type, OptionalExtension};

use super::{optional_timestamp_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Plan, PlanStatus, Step, StepStatus},
};

const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (id, session_id, title, description, template_id, status, created_at, started_at, completed_at, revision) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) ON CONFLICT(id) DO UPDATE SET status = excluded.status, started_at = excluded.started_at, completed_at = excluded.completed_at, revision = excluded.revision WHERE excluded.revision > plans.revision";
const UPSERT_STEP_SQL: &str = "INSERT INTO steps (id, plan_id, step_order, title, description, status, error_message, started_at, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) ON CONFLICT(id) DO UPDATE SET status = excluded.status, error_message = excluded.error_message, started_at = excluded.started_at, completed_at = excluded.completed_at";
const PLAN_COLUMNS: &str = "id, session_id, title, description, template_id, status, created_at, started_at, completed_at, revision";
const SELECT_STEPS_BY_PLAN_SQL: &str = "SELECT id, plan_id, step_order, title, description, status, error_message, started_at, completed_at FROM steps WHERE plan_id = ?1 ORDER BY step_order";

impl super::Database {
    fn build_plan_from_row(row: &rusqlite::Row) -> rusqlite::Result<Plan> {
        let status_str: String = row.get(5)?;
        let status = status_str.parse::<PlanStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("Invalid plan status: {status_str}").into(),
            )
        })?;

        Ok(Plan {
            id: row.get::<_, i64>(0)? as u64,
            session_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            template_id: row.get::<_, Option<i64>>(4)?.map(|id| id as u64),
            status,
            steps: Vec::new(),
            created_at: timestamp_column(row, 6)?,
            started_at: optional_timestamp_column(row, 7)?,
            completed_at: optional_timestamp_column(row, 8)?,
            revision: row.get::<_, i64>(9)? as u64,
        })
    }

    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        let status_str: String = row.get(5)?;
        let status = status_str.parse::<StepStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("Invalid step status: {status_str}").into(),
            )
        })?;

        Ok(Step {
            id: row.get::<_, i64>(0)? as u64,
            plan_id: row.get::<_, i64>(1)? as u64,
            order: row.get::<_, i64>(2)? as u32,
            title: row.get(3)?,
            description: row.get(4)?,
            status,
            error_message: row.get(6)?,
            started_at: optional_timestamp_column(row, 7)?,
            completed_at: optional_timestamp_column(row, 8)?,
        })
    }

    /// Writes a plan and all of its steps in one transaction. Identity
    /// columns are only written the first time; later saves update status
    /// and timestamps.
    ///
    /// A snapshot whose revision is not newer than the stored one is
    /// dropped, so writes that arrive out of order never roll a plan back.
    /// Returns whether the snapshot was written.
    pub fn save_plan(&mut self, plan: &Plan) -> Result<bool> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let written = tx.execute(
            UPSERT_PLAN_SQL,
            params![
                plan.id as i64,
                &plan.session_id,
                &plan.title,
                &plan.description,
                plan.template_id.map(|id| id as i64),
                plan.status.as_str(),
                plan.created_at.to_string(),
                plan.started_at.map(|t| t.to_string()),
                plan.completed_at.map(|t| t.to_string()),
                plan.revision as i64,
            ],
        )
        .db_context("Failed to save plan")?;

        if written == 0 {
            debug!(
                "Dropped stale snapshot of plan {} at revision {}",
                plan.id, plan.revision
            );
            return Ok(false);
        }

        for step in &plan.steps {
            tx.execute(
                UPSERT_STEP_SQL,
                params![
                    step.id as i64,
                    plan.id as i64,
                    step.order as i64,
                    &step.title,
                    &step.description,
                    step.status.as_str(),
                    step.error_message.as_deref(),
                    step.started_at.map(|t| t.to_string()),
                    step.completed_at.map(|t| t.to_string()),
                ],
            )
            .db_context("Failed to save step")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(true)
    }

    fn load_steps(&self, plan_id: u64) -> Result<Vec<Step>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_STEPS_BY_PLAN_SQL)
            .db_context("Failed to prepare steps query")?;

        let steps = stmt
            .query_map(params![plan_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read step row")?;

        Ok(steps)
    }

    /// Loads one plan with its steps.
    pub fn load_plan(&self, id: u64) -> Result<Option<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = ?1");
        let mut plan = self
            .connection
            .query_row(&sql, params![id as i64], Self::build_plan_from_row)
            .optional()
            .db_context("Failed to query plan")?;

        // Eagerly load steps if plan exists
        if let Some(ref mut plan) = plan {
            plan.steps = self.load_steps(plan.id)?;
        }

        Ok(plan)
    }

    /// Loads every stored plan with its steps, in id order.
    pub fn load_plans(&self) -> Result<Vec<Plan>> {
        let sql = format!("SELECT {PLAN_COLUMNS} FROM plans ORDER BY id");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare plans query")?;

        let mut plans = stmt
            .query_map([], Self::build_plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan row")?;

        for plan in &mut plans {
            plan.steps = self.load_steps(plan.id)?;
        }

        Ok(plans)
    }
}
