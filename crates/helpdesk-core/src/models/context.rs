//! Read-only snapshots handed to the AI collaborator and to transport layers.

use serde::{Deserialize, Serialize};

use super::{Plan, Progress, RankedSolution, ScoredProblem, Step, TemplateMatch};

/// Knowledge base matches for one user query.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeContext {
    pub has_matches: bool,
    /// Up to three best-scoring problems
    pub problems: Vec<ScoredProblem>,
    /// Up to five of their solutions, best success rate first
    pub top_solutions: Vec<RankedSolution>,
}

/// Identity of the plan summarized in a [`SessionTaskContext`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanBrief {
    pub id: u64,
    pub title: String,
    pub description: String,
}

/// Task state of a session: its active plan, if any.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionTaskContext {
    pub has_active_plan: bool,
    pub plan: Option<PlanBrief>,
    pub current_step: Option<Step>,
    pub progress: Option<Progress>,
}

impl SessionTaskContext {
    /// Summarize an active plan.
    pub fn for_plan(plan: &Plan) -> Self {
        Self {
            has_active_plan: true,
            plan: Some(PlanBrief {
                id: plan.id,
                title: plan.title.clone(),
                description: plan.description.clone(),
            }),
            current_step: plan.current_step().cloned(),
            progress: Some(plan.progress()),
        }
    }
}

/// Everything known about an inbound message before it is sent to the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InteractionContext {
    pub knowledge: KnowledgeContext,
    pub suggested_template: Option<TemplateMatch>,
    pub tasks: SessionTaskContext,
}

/// Outcome of a step transition (complete, skip or fail).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepTransition {
    /// The plan after the transition
    pub plan: Plan,
    /// The step the transition was applied to
    pub step: Step,
    /// The step that became current, if any
    pub next_step: Option<Step>,
    /// True when the transition finished the plan
    pub is_complete: bool,
}
