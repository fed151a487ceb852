//! Step operations for the Helpdesk.

use super::Helpdesk;
use crate::{
    error::Result,
    models::StepTransition,
    params::{FailStep, StepRef},
};

impl Helpdesk {
    /// Completes the current step of a plan and starts the next one.
    pub async fn complete_step(&self, params: &StepRef) -> Result<StepTransition> {
        let transition = self.plans.complete_step(params.plan_id, params.step_id)?;
        self.persist_plan(&transition.plan).await;
        Ok(transition)
    }

    /// Skips the current step of a plan and starts the next one.
    pub async fn skip_step(&self, params: &StepRef) -> Result<StepTransition> {
        let transition = self.plans.skip_step(params.plan_id, params.step_id)?;
        self.persist_plan(&transition.plan).await;
        Ok(transition)
    }

    /// Fails a step, which fails its plan.
    pub async fn fail_step(&self, params: &FailStep) -> Result<StepTransition> {
        let transition = self
            .plans
            .fail_step(params.plan_id, params.step_id, &params.error_message)?;
        self.persist_plan(&transition.plan).await;
        Ok(transition)
    }
}
