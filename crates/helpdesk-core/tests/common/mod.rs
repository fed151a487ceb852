use std::path::PathBuf;

use helpdesk_core::{Helpdesk, HelpdeskBuilder};
use tempfile::TempDir;

/// Creates a helpdesk backed by a fresh SQLite file in a temporary directory.
pub async fn create_test_helpdesk() -> (TempDir, Helpdesk) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let helpdesk = open_helpdesk(temp_dir.path().join("test.db")).await;
    (temp_dir, helpdesk)
}

/// Opens a helpdesk on an existing database path, as a restarted process
/// would.
pub async fn open_helpdesk(db_path: PathBuf) -> Helpdesk {
    HelpdeskBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create helpdesk")
}
