//! Helpdesk CLI
//!
//! Command-line front end for the helpdesk knowledge base, task templates
//! and task plans.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::Cli;
use helpdesk_core::HelpdeskBuilder;
use log::info;
use renderer::{OutputFormat, TerminalRenderer};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        catalog_file,
        no_color,
        json,
        command,
    } = Args::parse();

    let helpdesk = HelpdeskBuilder::new()
        .with_database_path(database_file)
        .with_catalog_file(catalog_file)
        .build()
        .await
        .context("Failed to initialize helpdesk")?;

    let renderer = TerminalRenderer::new(OutputFormat::from_flags(json, no_color));
    let cli = Cli::new(helpdesk, renderer);

    info!("Helpdesk started");

    match command {
        Some(Commands::Kb { command }) => cli.handle_kb_command(command).await,
        Some(Commands::Template { command }) => cli.handle_template_command(command).await,
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Step { command }) => cli.handle_step_command(command).await,
        Some(Commands::Context(args)) => cli.show_context(args.into()).await,
        None => cli.list_templates(None).await,
    }
}
