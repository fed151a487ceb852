//! Plan and step transitions.
//!
//! Every operation first checks all the edges it is about to take, and only
//! then writes. A rejected transition leaves the plan untouched; an accepted
//! one bumps the plan's revision while its lock is still held.

use jiff::Timestamp;
use log::debug;

use super::{lock_plan, TaskPlanEngine};
use crate::{
    error::{HelpdeskError, Result},
    models::{Plan, PlanEvent, PlanStatus, Step, StepEvent, StepStatus, StepTransition},
};

fn plan_edge(plan: &Plan, event: PlanEvent) -> Result<PlanStatus> {
    plan.status
        .next(event)
        .ok_or_else(|| HelpdeskError::InvalidTransition {
            entity: "plan",
            id: plan.id,
            from: plan.status.as_str().to_string(),
            action: event.as_str(),
        })
}

fn step_edge(step: &Step, event: StepEvent) -> Result<StepStatus> {
    step.status
        .next(event)
        .ok_or_else(|| HelpdeskError::InvalidTransition {
            entity: "step",
            id: step.id,
            from: step.status.as_str().to_string(),
            action: event.as_str(),
        })
}

/// Step operations need a running plan.
fn ensure_running(plan: &Plan, event: StepEvent) -> Result<()> {
    if plan.status == PlanStatus::InProgress {
        return Ok(());
    }
    let action = match event {
        StepEvent::Start => "start a step of",
        StepEvent::Complete => "complete a step of",
        StepEvent::Fail => "fail a step of",
        StepEvent::Skip => "skip a step of",
        StepEvent::Interrupt => "interrupt a step of",
    };
    Err(HelpdeskError::InvalidTransition {
        entity: "plan",
        id: plan.id,
        from: plan.status.as_str().to_string(),
        action,
    })
}

fn find_step(plan: &Plan, step_id: u64) -> Result<usize> {
    plan.step_index(step_id).ok_or(HelpdeskError::StepNotFound {
        plan_id: plan.id,
        id: step_id,
    })
}

/// Puts every in-progress step back to pending.
fn interrupt_running_steps(plan: &mut Plan) {
    for step in &mut plan.steps {
        if let Some(status) = step.status.next(StepEvent::Interrupt) {
            step.status = status;
            step.started_at = None;
        }
    }
}

impl TaskPlanEngine {
    /// Moves a `created` plan to `in_progress` and its first step, if any,
    /// to `in_progress`.
    pub fn start_plan(&self, plan_id: u64) -> Result<Plan> {
        let handle = self.plan_handle(plan_id)?;
        let mut plan = lock_plan(&handle);

        let plan_status = plan_edge(&plan, PlanEvent::Start)?;
        let first_status = plan
            .steps
            .first()
            .map(|step| step_edge(step, StepEvent::Start))
            .transpose()?;

        let now = Timestamp::now();
        plan.status = plan_status;
        plan.started_at = Some(now);
        if let (Some(first), Some(status)) = (plan.steps.first_mut(), first_status) {
            first.status = status;
            first.started_at = Some(now);
        }
        plan.revision += 1;

        debug!("Started plan {plan_id}");
        Ok(plan.clone())
    }

    /// Completes the plan's in-progress step and advances to the next one.
    /// Completing the last step completes the plan.
    pub fn complete_step(&self, plan_id: u64, step_id: u64) -> Result<StepTransition> {
        self.finish_step(plan_id, step_id, StepEvent::Complete)
    }

    /// Skips the plan's in-progress step and advances to the next one.
    /// Skipping the last step completes the plan.
    pub fn skip_step(&self, plan_id: u64, step_id: u64) -> Result<StepTransition> {
        self.finish_step(plan_id, step_id, StepEvent::Skip)
    }

    fn finish_step(&self, plan_id: u64, step_id: u64, event: StepEvent) -> Result<StepTransition> {
        let handle = self.plan_handle(plan_id)?;
        let mut plan = lock_plan(&handle);

        let index = find_step(&plan, step_id)?;
        ensure_running(&plan, event)?;
        let step_status = step_edge(&plan.steps[index], event)?;

        // Orders are contiguous, so the step at order + 1 is the next slot.
        let next_index = index + 1;
        let next_status = plan
            .steps
            .get(next_index)
            .map(|next| step_edge(next, StepEvent::Start))
            .transpose()?;
        let plan_status = match next_status {
            Some(_) => None,
            None => Some(plan_edge(&plan, PlanEvent::Complete)?),
        };

        let now = Timestamp::now();
        let step = &mut plan.steps[index];
        step.status = step_status;
        step.completed_at = Some(now);

        if let Some(status) = next_status {
            let next = &mut plan.steps[next_index];
            next.status = status;
            next.started_at = Some(now);
        }
        if let Some(status) = plan_status {
            plan.status = status;
            plan.completed_at = Some(now);
        }
        plan.revision += 1;

        debug!(
            "Step {step_id} of plan {plan_id} is {}, plan is {}",
            step_status.as_str(),
            plan.status.as_str()
        );

        Ok(StepTransition {
            step: plan.steps[index].clone(),
            next_step: next_status.map(|_| plan.steps[next_index].clone()),
            is_complete: plan_status.is_some(),
            plan: plan.clone(),
        })
    }

    /// Fails a pending or in-progress step and, with it, the whole plan.
    ///
    /// Remaining steps keep their status except an in-progress step other
    /// than the failed one, which returns to pending. The plan's
    /// `completed_at` is left unset.
    pub fn fail_step(
        &self,
        plan_id: u64,
        step_id: u64,
        error_message: &str,
    ) -> Result<StepTransition> {
        let handle = self.plan_handle(plan_id)?;
        let mut plan = lock_plan(&handle);

        let index = find_step(&plan, step_id)?;
        ensure_running(&plan, StepEvent::Fail)?;
        let step_status = step_edge(&plan.steps[index], StepEvent::Fail)?;
        let plan_status = plan_edge(&plan, PlanEvent::Fail)?;

        let now = Timestamp::now();
        let step = &mut plan.steps[index];
        step.status = step_status;
        step.error_message = Some(error_message.to_string());
        step.completed_at = Some(now);

        interrupt_running_steps(&mut plan);
        plan.status = plan_status;
        plan.revision += 1;

        debug!("Step {step_id} of plan {plan_id} failed: {error_message}");

        Ok(StepTransition {
            step: plan.steps[index].clone(),
            next_step: None,
            is_complete: false,
            plan: plan.clone(),
        })
    }

    /// Abandons a plan that is `created` or `in_progress`. A running step
    /// returns to pending.
    pub fn cancel_plan(&self, plan_id: u64) -> Result<Plan> {
        let handle = self.plan_handle(plan_id)?;
        let mut plan = lock_plan(&handle);

        let plan_status = plan_edge(&plan, PlanEvent::Cancel)?;
        interrupt_running_steps(&mut plan);
        plan.status = plan_status;
        plan.revision += 1;

        debug!("Cancelled plan {plan_id}");
        Ok(plan.clone())
    }
}
