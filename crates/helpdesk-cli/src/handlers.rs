//! Command handlers: run a parsed command against the helpdesk and print the
//! result.

use anyhow::Result;
use helpdesk_core::{
    display::{
        Categories, CreateResult, FeedbackResult, OperationStatus, Plans, QuickSolutionList,
        SearchResults, Templates, UpdateResult,
    },
    params::{Interaction, RecordFeedback, Session},
    Helpdesk, HelpdeskError, Plan,
};
use log::debug;

use crate::{
    cli::{KbCommands, PlanCommands, StepCommands, TemplateCommands},
    renderer::TerminalRenderer,
};

pub struct Cli {
    helpdesk: Helpdesk,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(helpdesk: Helpdesk, renderer: TerminalRenderer) -> Self {
        Self { helpdesk, renderer }
    }

    pub async fn handle_kb_command(&self, command: KbCommands) -> Result<()> {
        match command {
            KbCommands::Search(args) => {
                let results = SearchResults(self.helpdesk.search(&args.into()).await);
                self.renderer.show(&results, &results.0)
            }
            KbCommands::Problem(args) => {
                let id = args.id;
                let problem = self
                    .helpdesk
                    .get_problem(&args.into())
                    .await
                    .ok_or(HelpdeskError::ProblemNotFound { id })?;
                self.renderer.show(&problem, &problem)
            }
            KbCommands::Solution(args) => {
                let id = args.id;
                let solution = self
                    .helpdesk
                    .get_solution(&args.into())
                    .await
                    .ok_or(HelpdeskError::SolutionNotFound { id })?;
                self.renderer.show(&solution, &solution)
            }
            KbCommands::Categories => {
                let categories = Categories(self.helpdesk.categories().await);
                self.renderer.show(&categories, &categories.0)
            }
            KbCommands::Feedback(args) => {
                let params: RecordFeedback = args.into();
                let solution = self.helpdesk.record_feedback(&params).await?;
                let result = FeedbackResult {
                    solution,
                    success: params.success,
                };
                self.renderer.show(&result, &result.solution)
            }
            KbCommands::Quick(args) => {
                let solutions =
                    QuickSolutionList(self.helpdesk.quick_solutions(&args.into()).await);
                self.renderer.show(&solutions, &solutions.0)
            }
            KbCommands::Context(args) => {
                let context = self.helpdesk.context_for_query(&args.message).await;
                self.renderer.show(&context, &context)
            }
        }
    }

    pub async fn handle_template_command(&self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::List(args) => self.list_templates(args.category.as_deref()).await,
            TemplateCommands::Show(args) => {
                let id = args.id;
                let template = self
                    .helpdesk
                    .get_template(&args.into())
                    .await
                    .ok_or(HelpdeskError::TemplateNotFound { id })?;
                self.renderer.show(&template, &template)
            }
            TemplateCommands::Detect(args) => {
                match self.helpdesk.detect_template(&args.message).await {
                    Some(detected) => self.renderer.show(&detected, &detected),
                    None => self.renderer.show(
                        &OperationStatus::notice("No template matches this message."),
                        &None::<()>,
                    ),
                }
            }
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.helpdesk.create_plan(&args.into()).await?;
                self.show_created(plan)
            }
            PlanCommands::FromTemplate(args) => {
                let plan = self.helpdesk.create_plan_from_template(&args.into()).await?;
                self.show_created(plan)
            }
            PlanCommands::FromMessage(args) => {
                match self.helpdesk.create_plan_from_message(&args.into()).await? {
                    Some(plan) => self.show_created(plan),
                    None => self.renderer.show(
                        &OperationStatus::notice(
                            "No template matches this message; no plan created.",
                        ),
                        &None::<Plan>,
                    ),
                }
            }
            PlanCommands::Show(args) => {
                let id = args.id;
                let plan = self
                    .helpdesk
                    .get_plan(&args.into())
                    .await
                    .ok_or(HelpdeskError::PlanNotFound { id })?;
                self.renderer.show(&plan, &plan)
            }
            PlanCommands::List(args) => {
                let plans = Plans(self.helpdesk.list_plans(&args.into()).await);
                self.renderer.show(&plans, &plans.0)
            }
            PlanCommands::Start(args) => {
                let plan = self.helpdesk.start_plan(&args.into()).await?;
                self.show_updated(plan, "Started")
            }
            PlanCommands::Cancel(args) => {
                let plan = self.helpdesk.cancel_plan(&args.into()).await?;
                self.show_updated(plan, "Cancelled")
            }
            PlanCommands::Active(args) => {
                let session: Session = args.into();
                match self.helpdesk.active_plan(&session).await {
                    Some(plan) => self.renderer.show(&plan, &plan),
                    None => self.renderer.show(
                        &OperationStatus::notice(format!(
                            "No active plan for session '{}'.",
                            session.session_id
                        )),
                        &None::<Plan>,
                    ),
                }
            }
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        let transition = match command {
            StepCommands::Complete(args) => self.helpdesk.complete_step(&args.into()).await?,
            StepCommands::Skip(args) => self.helpdesk.skip_step(&args.into()).await?,
            StepCommands::Fail(args) => self.helpdesk.fail_step(&args.into()).await?,
        };
        debug!(
            "Step {} of plan {} is now {}",
            transition.step.id, transition.plan.id, transition.step.status
        );
        self.renderer.show(&transition, &transition)
    }

    pub async fn show_context(&self, params: Interaction) -> Result<()> {
        let context = self.helpdesk.interaction_context(&params).await?;
        self.renderer.show(&context, &context)
    }

    pub async fn list_templates(&self, category: Option<&str>) -> Result<()> {
        let templates = Templates(self.helpdesk.list_templates(category).await);
        self.renderer.show(&templates, &templates.0)
    }

    fn show_created(&self, plan: Plan) -> Result<()> {
        let result = CreateResult::new(plan);
        self.renderer.show(&result, &result.resource)
    }

    fn show_updated(&self, plan: Plan, verb: &str) -> Result<()> {
        let headline = format!("{verb} plan {}", plan.id);
        let result = UpdateResult::new(plan, headline);
        self.renderer.show(&result, &result.resource)
    }
}
