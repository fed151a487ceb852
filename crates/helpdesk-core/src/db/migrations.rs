//! Database schema initialization and migrations.

use log::debug;

use crate::error::{DatabaseResultExt, Result};

/// Version stamped into `PRAGMA user_version` once the schema is applied.
const SCHEMA_VERSION: i64 = 2;

/// Version 2 adds `plans.revision`.
const ADD_PLAN_REVISION_SQL: &str =
    "ALTER TABLE plans ADD COLUMN revision INTEGER NOT NULL DEFAULT 0";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;

        if version == 0 {
            let schema_sql = include_str!("../../assets/schema.sql");
            self.connection
                .execute_batch(schema_sql)
                .db_context("Failed to initialize database schema")?;
        } else if version < 2 {
            self.connection
                .execute(ADD_PLAN_REVISION_SQL, [])
                .db_context("Failed to add plan revision column")?;
        }

        if version < SCHEMA_VERSION {
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
            debug!("Applied schema version {SCHEMA_VERSION}");
        }

        Ok(())
    }
}
