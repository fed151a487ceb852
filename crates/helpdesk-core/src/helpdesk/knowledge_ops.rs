//! Knowledge base and template operations for the Helpdesk.

use std::sync::Arc;

use tokio::task;

use super::Helpdesk;
use crate::{
    error::{HelpdeskError, Result},
    models::{
        InteractionContext, KnowledgeContext, Problem, RankedSolution, ScoredProblem, Solution,
        Template, TemplateMatch,
    },
    params::{Id, Interaction, QuickSolutions, RecordFeedback, SearchKnowledge},
};

impl Helpdesk {
    /// Ranks problems by relevance to a query.
    pub async fn search(&self, params: &SearchKnowledge) -> Vec<ScoredProblem> {
        self.knowledge
            .search(&params.query, params.category.as_deref())
    }

    /// Retrieves a problem with its solutions.
    pub async fn get_problem(&self, params: &Id) -> Option<Problem> {
        self.knowledge.get_problem(params.id)
    }

    /// Retrieves a single solution with its current counters.
    pub async fn get_solution(&self, params: &Id) -> Option<Solution> {
        self.knowledge.get_solution(params.id)
    }

    /// Distinct problem categories.
    pub async fn categories(&self) -> Vec<String> {
        self.knowledge.categories()
    }

    /// Records whether a solution worked and stores the report.
    ///
    /// The counter update is final once this returns `Ok`, whether or not
    /// the store accepted it.
    pub async fn record_feedback(&self, params: &RecordFeedback) -> Result<Solution> {
        let solution = self
            .knowledge
            .record_feedback(params.solution_id, params.success)?;

        let (solution_id, success) = (params.solution_id, params.success);
        self.persist(format!("feedback for solution {solution_id}"), move |store| {
            store.persist_feedback(solution_id, success)
        })
        .await;

        Ok(solution)
    }

    /// Solutions with a proven track record, best first.
    pub async fn quick_solutions(&self, params: &QuickSolutions) -> Vec<RankedSolution> {
        self.knowledge
            .quick_solutions(params.min_success_rate, params.min_uses)
    }

    /// Knowledge context for a message: best problems and their best
    /// solutions.
    pub async fn context_for_query(&self, query: &str) -> KnowledgeContext {
        self.knowledge.context_for_query(query)
    }

    /// Task templates, optionally restricted to one category.
    pub async fn list_templates(&self, category: Option<&str>) -> Vec<Template> {
        self.templates.list_templates(category)
    }

    /// Retrieves a template by ID.
    pub async fn get_template(&self, params: &Id) -> Option<Template> {
        self.templates.get_template(params.id)
    }

    /// The template that best fits a message, if any scores high enough.
    pub async fn detect_template(&self, message: &str) -> Option<TemplateMatch> {
        self.templates.detect_template(message)
    }

    /// Everything known about an inbound message: knowledge matches, the
    /// suggested template and the session's active plan.
    ///
    /// The knowledge search and template detection run side by side on the
    /// blocking pool; both only read catalog data.
    pub async fn interaction_context(&self, params: &Interaction) -> Result<InteractionContext> {
        let knowledge = Arc::clone(&self.knowledge);
        let templates = Arc::clone(&self.templates);
        let query = params.message.clone();
        let message = params.message.clone();

        let (knowledge, suggested_template) = tokio::join!(
            task::spawn_blocking(move || knowledge.context_for_query(&query)),
            task::spawn_blocking(move || templates.detect_template(&message)),
        );

        Ok(InteractionContext {
            knowledge: knowledge.map_err(HelpdeskError::join)?,
            suggested_template: suggested_template.map_err(HelpdeskError::join)?,
            tasks: self.plans.context_for_session(&params.session_id),
        })
    }
}
