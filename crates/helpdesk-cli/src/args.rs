use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{ContextArgs, KbCommands, PlanCommands, StepCommands, TemplateCommands};

/// Troubleshooting assistant for a support desk
///
/// Searches a knowledge base of common IT problems, records whether
/// solutions worked, and walks a session through step-by-step task plans
/// built from templates.
#[derive(Parser)]
#[command(version, about, name = "hd")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/helpdesk/helpdesk.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Load problems and templates from this JSON file instead of the
    /// built-in catalog. Stored feedback is matched by solution position, so
    /// pair each catalog with its own --database-file
    #[arg(long, global = true)]
    pub catalog_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search and rate the knowledge base
    #[command(alias = "k")]
    Kb {
        #[command(subcommand)]
        command: KbCommands,
    },
    /// Browse and detect task templates
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Manage task plans
    #[command(alias = "p")]
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Move a plan's steps forward
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Show everything known about a message: knowledge matches, the
    /// suggested template and the session's active plan
    #[command(alias = "c")]
    Context(ContextArgs),
}
