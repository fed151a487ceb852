//! Bootstrap data for the knowledge base and the task template catalog.
//!
//! A catalog is a JSON document with two arrays:
//!
//! ```json
//! {
//!   "problems": [
//!     {
//!       "category": "Printer",
//!       "title": "Printer Offline",
//!       "description": "Printer shows as offline or not responding",
//!       "keywords": ["printer", "offline"],
//!       "solutions": [{ "title": "Restart Print Spooler", "steps": ["..."] }]
//!     }
//!   ],
//!   "templates": [
//!     {
//!       "name": "Fix Printer Offline",
//!       "description": "...",
//!       "category": "Printer",
//!       "keywords": ["printer"],
//!       "steps": [{ "title": "Restart Printer", "description": "..." }]
//!     }
//!   ]
//! }
//! ```
//!
//! Entries carry no identities. Ids are handed out in document order when the
//! catalog is loaded into a [`crate::KnowledgeStore`] or a
//! [`crate::TaskCatalog`], so the same document always yields the same ids and
//! persisted feedback keeps pointing at the right solution across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{HelpdeskError, Result},
    models::StepBlueprint,
};

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// A problem as written in the catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProblemEntry {
    pub category: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub solutions: Vec<SolutionEntry>,
}

/// A solution as written in the catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolutionEntry {
    pub title: String,
    pub steps: Vec<String>,
}

/// A task template as written in the catalog document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateEntry {
    pub name: String,
    pub description: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub steps: Vec<StepBlueprint>,
}

/// Problems, solutions and templates loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    #[serde(default)]
    pub problems: Vec<ProblemEntry>,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
}

impl Catalog {
    /// The IT-support catalog shipped with the library.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parses and validates a catalog document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a catalog document from disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| HelpdeskError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// Rejects entries the engines cannot work with: blank titles, blank
    /// keywords and template steps without a title or description.
    pub fn validate(&self) -> Result<()> {
        for (i, problem) in self.problems.iter().enumerate() {
            if problem.title.trim().is_empty() {
                return Err(HelpdeskError::invalid_input(format!("problems[{i}].title"))
                    .with_reason("Problem title cannot be empty"));
            }
            check_keywords(&problem.keywords, &format!("problems[{i}]"))?;
            for (j, solution) in problem.solutions.iter().enumerate() {
                if solution.title.trim().is_empty() {
                    return Err(HelpdeskError::invalid_input(format!(
                        "problems[{i}].solutions[{j}].title"
                    ))
                    .with_reason("Solution title cannot be empty"));
                }
            }
        }

        for (i, template) in self.templates.iter().enumerate() {
            if template.name.trim().is_empty() {
                return Err(HelpdeskError::invalid_input(format!("templates[{i}].name"))
                    .with_reason("Template name cannot be empty"));
            }
            check_keywords(&template.keywords, &format!("templates[{i}]"))?;
            crate::engine::validate_blueprints(&template.steps)
                .map_err(|e| match e {
                    HelpdeskError::InvalidInput { field, reason } => HelpdeskError::InvalidInput {
                        field: format!("templates[{i}].{field}"),
                        reason,
                    },
                    other => other,
                })?;
        }

        Ok(())
    }
}

/// A blank keyword is a substring of every message.
fn check_keywords(keywords: &[String], owner: &str) -> Result<()> {
    match keywords.iter().position(|k| k.trim().is_empty()) {
        Some(j) => Err(
            HelpdeskError::invalid_input(format!("{owner}.keywords[{j}]"))
                .with_reason("Keyword cannot be empty"),
        ),
        None => Ok(()),
    }
}
