//! Builder for creating and configuring Helpdesk instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{info, warn};
use tokio::task;

use super::Helpdesk;
use crate::{
    catalog::Catalog,
    engine::TaskPlanEngine,
    error::{HelpdeskError, Result},
    knowledge::KnowledgeStore,
    persistence::{Persistence, SqliteStore},
    task_catalog::TaskCatalog,
};

#[derive(Clone)]
enum StoreChoice {
    Sqlite,
    Custom(Arc<dyn Persistence>),
    Disabled,
}

/// Builder for creating and configuring Helpdesk instances.
#[derive(Clone)]
pub struct HelpdeskBuilder {
    database_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    catalog: Option<Catalog>,
    store: StoreChoice,
}

impl HelpdeskBuilder {
    /// Creates a new builder with default settings: the built-in catalog and
    /// a SQLite store at the XDG default location.
    pub fn new() -> Self {
        Self {
            database_path: None,
            catalog_path: None,
            catalog: None,
            store: StoreChoice::Sqlite,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/helpdesk/helpdesk.db` or
    /// `~/.local/share/helpdesk/helpdesk.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Loads the catalog from a JSON file instead of the built-in one.
    ///
    /// Solution ids follow document order, and stored feedback is keyed by
    /// solution id. Reordering the solutions of a catalog, or switching to
    /// another catalog against the same database, therefore attaches stored
    /// counters to whatever solution now holds each id. Use a separate
    /// database per catalog.
    pub fn with_catalog_file<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.catalog_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an already loaded catalog. Takes precedence over
    /// [`HelpdeskBuilder::with_catalog_file`], and stored feedback is matched
    /// to it the same way.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Uses a caller-provided store instead of SQLite.
    pub fn with_persistence(mut self, store: Arc<dyn Persistence>) -> Self {
        self.store = StoreChoice::Custom(store);
        self
    }

    /// Keeps all state in memory only.
    pub fn without_persistence(mut self) -> Self {
        self.store = StoreChoice::Disabled;
        self
    }

    /// Builds the configured helpdesk.
    ///
    /// Stored feedback counters and plans are loaded back into the engines.
    /// A store that fails to load is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns `HelpdeskError::FileSystem` if the catalog file or database
    /// directory cannot be accessed
    /// Returns `HelpdeskError::InvalidInput` or
    /// `HelpdeskError::Serialization` if the catalog is invalid
    /// Returns `HelpdeskError::Database` if database initialization fails
    pub async fn build(self) -> Result<Helpdesk> {
        let catalog = match (self.catalog, self.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => task::spawn_blocking(move || Catalog::from_path(path))
                .await
                .map_err(HelpdeskError::join)??,
            (None, None) => Catalog::builtin()?,
        };

        let store: Option<Arc<dyn Persistence>> = match self.store {
            StoreChoice::Sqlite => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                Some(Arc::new(Self::open_sqlite(db_path).await?))
            }
            StoreChoice::Custom(store) => Some(store),
            StoreChoice::Disabled => None,
        };

        let knowledge = KnowledgeStore::new(&catalog);
        let templates = TaskCatalog::new(&catalog);
        let plans = TaskPlanEngine::new();
        info!(
            "Loaded catalog with {} problems, {} solutions and {} templates",
            knowledge.problem_count(),
            knowledge.solution_count(),
            templates.len()
        );

        if let Some(store) = &store {
            let store = Arc::clone(store);
            let loaded = task::spawn_blocking(move || {
                (store.load_all_feedback(), store.load_all_plans())
            })
            .await
            .map_err(HelpdeskError::join)?;

            match loaded.0 {
                Ok(records) => {
                    let applied = knowledge.seed_feedback(&records);
                    info!("Seeded feedback for {applied} solutions");
                    if applied < records.len() {
                        warn!(
                            "Ignored stored feedback for {} solutions missing from the catalog; \
                             the database may belong to a different catalog",
                            records.len() - applied
                        );
                    }
                }
                Err(e) => warn!("Failed to load stored feedback: {e}"),
            }
            match loaded.1 {
                Ok(stored) => {
                    plans.restore(stored);
                }
                Err(e) => warn!("Failed to load stored plans: {e}"),
            }
        }

        Ok(Helpdesk::new(knowledge, templates, plans, store))
    }

    async fn open_sqlite(db_path: PathBuf) -> Result<SqliteStore> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| HelpdeskError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        task::spawn_blocking(move || SqliteStore::open(&db_path))
            .await
            .map_err(HelpdeskError::join)?
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("helpdesk")
            .place_data_file("helpdesk.db")
            .map_err(|e| HelpdeskError::XdgDirectory(e.to_string()))
    }
}

impl Default for HelpdeskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
