//! Command-line argument definitions.
//!
//! Each command has a clap argument struct that converts into the matching
//! `helpdesk_core::params` type with `From`, so clap attributes never leak
//! into the core crate:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Helpdesk
//! ```

use clap::{Args, Subcommand};
use helpdesk_core::{params::*, StepBlueprint};

/// Session used when `--session` is not given.
pub const DEFAULT_SESSION: &str = "cli";

/// Support session selector shared by session-scoped commands.
#[derive(Args)]
pub struct SessionArg {
    /// Support session the plan belongs to
    #[arg(short, long, default_value = DEFAULT_SESSION)]
    pub session: String,
}

impl From<SessionArg> for Session {
    fn from(val: SessionArg) -> Self {
        Session {
            session_id: val.session,
        }
    }
}

/// A single resource ID.
#[derive(Args)]
pub struct IdArg {
    pub id: u64,
}

impl From<IdArg> for Id {
    fn from(val: IdArg) -> Self {
        Id { id: val.id }
    }
}

// ============================================================================
// Knowledge base
// ============================================================================

/// Search problems by relevance to a query
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query, e.g. "printer offline"
    pub query: String,
    /// Only search problems in this category
    #[arg(short, long)]
    pub category: Option<String>,
}

impl From<SearchArgs> for SearchKnowledge {
    fn from(val: SearchArgs) -> Self {
        SearchKnowledge {
            query: val.query,
            category: val.category,
        }
    }
}

/// Report whether a solution worked
#[derive(Args)]
pub struct FeedbackArgs {
    /// ID of the solution that was tried
    pub solution_id: u64,
    /// The solution did not fix the problem
    #[arg(long)]
    pub failed: bool,
}

impl From<FeedbackArgs> for RecordFeedback {
    fn from(val: FeedbackArgs) -> Self {
        RecordFeedback {
            solution_id: val.solution_id,
            success: !val.failed,
        }
    }
}

/// List solutions with a proven track record
#[derive(Args)]
pub struct QuickArgs {
    /// Lowest success rate, between 0 and 1
    #[arg(long, default_value_t = QuickSolutions::default().min_success_rate)]
    pub min_success_rate: f64,
    /// Lowest number of feedback reports
    #[arg(long, default_value_t = QuickSolutions::default().min_uses)]
    pub min_uses: u64,
}

impl From<QuickArgs> for QuickSolutions {
    fn from(val: QuickArgs) -> Self {
        QuickSolutions {
            min_success_rate: val.min_success_rate,
            min_uses: val.min_uses,
        }
    }
}

/// A free-text user message.
#[derive(Args)]
pub struct MessageArg {
    /// What the user wrote, e.g. "my vpn keeps disconnecting"
    pub message: String,
}

#[derive(Subcommand)]
pub enum KbCommands {
    /// Search problems by relevance to a query
    #[command(alias = "s")]
    Search(SearchArgs),
    /// Show a problem and its solutions
    #[command(alias = "p")]
    Problem(IdArg),
    /// Show a single solution
    Solution(IdArg),
    /// List problem categories
    Categories,
    /// Report whether a solution worked
    #[command(alias = "f")]
    Feedback(FeedbackArgs),
    /// List solutions with a proven track record
    #[command(alias = "q")]
    Quick(QuickArgs),
    /// Show the best problems and solutions for a message
    Context(MessageArg),
}

// ============================================================================
// Templates
// ============================================================================

/// List task templates
#[derive(Args)]
pub struct ListTemplatesArgs {
    /// Only list templates in this category
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List task templates
    #[command(aliases = ["l", "ls"])]
    List(ListTemplatesArgs),
    /// Show a template and its steps
    #[command(alias = "s")]
    Show(IdArg),
    /// Find the template that fits a message
    #[command(alias = "d")]
    Detect(MessageArg),
}

// ============================================================================
// Plans
// ============================================================================

/// Parses `"Title: description"`. Without a colon the whole text is used as
/// both title and description.
fn parse_step(value: &str) -> Result<StepBlueprint, String> {
    let (title, description) = match value.split_once(':') {
        Some((title, description)) => (title.trim(), description.trim()),
        None => (value.trim(), value.trim()),
    };
    if title.is_empty() {
        return Err("step title cannot be empty".to_string());
    }
    if description.is_empty() {
        return Err(format!("step '{title}' needs a description after ':'"));
    }
    Ok(StepBlueprint::new(title, description))
}

/// Create a plan from an explicit list of steps
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Title of the plan
    pub title: String,
    /// Description of the problem the plan addresses
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// A step as "Title: description"; repeat for each step in order
    #[arg(long = "step", value_parser = parse_step)]
    pub steps: Vec<StepBlueprint>,
    #[command(flatten)]
    pub session: SessionArg,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan {
            session_id: val.session.session,
            title: val.title,
            description: val.description,
            steps: val.steps,
            template_id: None,
        }
    }
}

/// Create a plan from a template
#[derive(Args)]
pub struct FromTemplateArgs {
    /// ID of the template to instantiate
    pub template_id: u64,
    #[command(flatten)]
    pub session: SessionArg,
}

impl From<FromTemplateArgs> for CreateFromTemplate {
    fn from(val: FromTemplateArgs) -> Self {
        CreateFromTemplate {
            session_id: val.session.session,
            template_id: val.template_id,
        }
    }
}

/// Create a plan from the template detected in a message
#[derive(Args)]
pub struct FromMessageArgs {
    /// What the user wrote
    pub message: String,
    #[command(flatten)]
    pub session: SessionArg,
}

impl From<FromMessageArgs> for CreateFromMessage {
    fn from(val: FromMessageArgs) -> Self {
        CreateFromMessage {
            session_id: val.session.session,
            message: val.message,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a plan from an explicit list of steps
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Create a plan from a template
    #[command(alias = "t")]
    FromTemplate(FromTemplateArgs),
    /// Create a plan from the template detected in a message
    #[command(alias = "m")]
    FromMessage(FromMessageArgs),
    /// Show a plan and its steps
    #[command(alias = "s")]
    Show(IdArg),
    /// List a session's plans, newest first
    #[command(aliases = ["l", "ls"])]
    List(SessionArg),
    /// Start a plan and its first step
    Start(IdArg),
    /// Cancel a plan that has not finished
    Cancel(IdArg),
    /// Show the session's in-progress plan
    #[command(alias = "a")]
    Active(SessionArg),
}

// ============================================================================
// Steps
// ============================================================================

/// Identify a step of a plan
#[derive(Args)]
pub struct StepRefArgs {
    /// ID of the plan
    pub plan_id: u64,
    /// ID of the step (not its position)
    pub step_id: u64,
}

impl From<StepRefArgs> for StepRef {
    fn from(val: StepRefArgs) -> Self {
        StepRef {
            plan_id: val.plan_id,
            step_id: val.step_id,
        }
    }
}

/// Mark a step as failed, which fails its plan
#[derive(Args)]
pub struct FailStepArgs {
    #[command(flatten)]
    pub step: StepRefArgs,
    /// What went wrong
    pub error_message: String,
}

impl From<FailStepArgs> for FailStep {
    fn from(val: FailStepArgs) -> Self {
        FailStep {
            plan_id: val.step.plan_id,
            step_id: val.step.step_id,
            error_message: val.error_message,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Complete the current step and start the next
    #[command(aliases = ["c", "done"])]
    Complete(StepRefArgs),
    /// Skip the current step and start the next
    Skip(StepRefArgs),
    /// Mark a step as failed, which fails its plan
    #[command(alias = "f")]
    Fail(FailStepArgs),
}

// ============================================================================
// Interaction context
// ============================================================================

/// Show everything known about a message
#[derive(Args)]
pub struct ContextArgs {
    /// What the user wrote
    pub message: String,
    #[command(flatten)]
    pub session: SessionArg,
}

impl From<ContextArgs> for Interaction {
    fn from(val: ContextArgs) -> Self {
        Interaction {
            session_id: val.session.session,
            message: val.message,
        }
    }
}
