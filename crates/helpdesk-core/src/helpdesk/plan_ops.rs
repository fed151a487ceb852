//! Plan operations for the Helpdesk.

use log::debug;

use super::Helpdesk;
use crate::{
    error::{HelpdeskError, Result},
    models::{Plan, SessionTaskContext},
    params::{CreateFromMessage, CreateFromTemplate, CreatePlan, Id, Session},
};

impl Helpdesk {
    /// Creates a plan from an explicit list of steps.
    pub async fn create_plan(&self, params: &CreatePlan) -> Result<Plan> {
        let plan = self.plans.create_plan(
            &params.session_id,
            &params.title,
            &params.description,
            &params.steps,
            params.template_id,
        )?;
        self.persist_plan(&plan).await;
        Ok(plan)
    }

    /// Instantiates a template as a new plan.
    pub async fn create_plan_from_template(&self, params: &CreateFromTemplate) -> Result<Plan> {
        let template = self
            .templates
            .get_template(params.template_id)
            .ok_or(HelpdeskError::TemplateNotFound {
                id: params.template_id,
            })?;

        let plan = self
            .plans
            .create_from_template(&params.session_id, &template)?;
        self.persist_plan(&plan).await;
        Ok(plan)
    }

    /// Detects the template a message asks for and instantiates it. Returns
    /// `None` when no template matches.
    pub async fn create_plan_from_message(
        &self,
        params: &CreateFromMessage,
    ) -> Result<Option<Plan>> {
        let Some(detected) = self.templates.detect_template(&params.message) else {
            debug!(
                "No template matches message for session {}",
                params.session_id
            );
            return Ok(None);
        };

        let plan = self
            .plans
            .create_from_template(&params.session_id, &detected.template)?;
        self.persist_plan(&plan).await;
        Ok(Some(plan))
    }

    /// Retrieves a plan by its ID.
    pub async fn get_plan(&self, params: &Id) -> Option<Plan> {
        self.plans.get_plan(params.id)
    }

    /// Lists a session's plans, newest first.
    pub async fn list_plans(&self, params: &Session) -> Vec<Plan> {
        self.plans.plans_for_session(&params.session_id)
    }

    /// Starts a created plan and its first step.
    pub async fn start_plan(&self, params: &Id) -> Result<Plan> {
        let plan = self.plans.start_plan(params.id)?;
        self.persist_plan(&plan).await;
        Ok(plan)
    }

    /// Abandons a plan that has not finished.
    pub async fn cancel_plan(&self, params: &Id) -> Result<Plan> {
        let plan = self.plans.cancel_plan(params.id)?;
        self.persist_plan(&plan).await;
        Ok(plan)
    }

    /// The session's in-progress plan, if any.
    pub async fn active_plan(&self, params: &Session) -> Option<Plan> {
        self.plans.get_active_plan(&params.session_id)
    }

    /// Summary of the session's active plan.
    pub async fn context_for_session(&self, params: &Session) -> SessionTaskContext {
        self.plans.context_for_session(&params.session_id)
    }
}
