//! The task-plan engine: plan registration, lookups and the step state
//! machine.
//!
//! Plans live in a table of `Arc<Mutex<Plan>>`. The table lock is only held
//! long enough to find or insert a handle; every transition then runs under
//! the mutex of its own plan, so two callers racing on the same plan are
//! serialized while callers working on different plans never wait on each
//! other.
//!
//! ```rust
//! use helpdesk_core::{StepBlueprint, TaskPlanEngine};
//!
//! let engine = TaskPlanEngine::new();
//! let plan = engine
//!     .create_plan(
//!         "session-1",
//!         "Fix printer",
//!         "Printer shows offline",
//!         &[StepBlueprint::new("Restart", "Power-cycle the printer")],
//!         None,
//!     )
//!     .unwrap();
//!
//! let started = engine.start_plan(plan.id).unwrap();
//! let done = engine.complete_step(plan.id, started.steps[0].id).unwrap();
//! assert!(done.is_complete);
//! ```

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard,
    },
};

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    error::{HelpdeskError, Result},
    models::{Plan, PlanStatus, SessionTaskContext, Step, StepBlueprint, StepStatus, Template},
};

mod transitions;


type PlanHandle = Arc<Mutex<Plan>>;

/// Checks a blueprint list: every entry needs a non-blank title and
/// description.
pub fn validate_blueprints(blueprints: &[StepBlueprint]) -> Result<()> {
    for (i, blueprint) in blueprints.iter().enumerate() {
        if blueprint.title.trim().is_empty() {
            return Err(HelpdeskError::invalid_input(format!("steps[{i}].title"))
                .with_reason("Step title cannot be empty"));
        }
        if blueprint.description.trim().is_empty() {
            return Err(HelpdeskError::invalid_input(format!("steps[{i}].description"))
                .with_reason("Step description cannot be empty"));
        }
    }
    Ok(())
}

/// Registry of plans and the only place plan state changes.
pub struct TaskPlanEngine {
    plans: RwLock<BTreeMap<u64, PlanHandle>>,
    next_plan_id: AtomicU64,
    next_step_id: AtomicU64,
}

impl Default for TaskPlanEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_plan(handle: &PlanHandle) -> MutexGuard<'_, Plan> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TaskPlanEngine {
    /// Creates an empty engine. Plan and step ids start at 1.
    pub fn new() -> Self {
        Self {
            plans: RwLock::new(BTreeMap::new()),
            next_plan_id: AtomicU64::new(1),
            next_step_id: AtomicU64::new(1),
        }
    }

    fn table(&self) -> RwLockReadGuard<'_, BTreeMap<u64, PlanHandle>> {
        self.plans.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn plan_handle(&self, plan_id: u64) -> Result<PlanHandle> {
        self.table()
            .get(&plan_id)
            .cloned()
            .ok_or(HelpdeskError::PlanNotFound { id: plan_id })
    }

    /// Handles of all plans in creation order, taken without holding the
    /// table lock afterwards.
    fn handles(&self) -> Vec<PlanHandle> {
        self.table().values().cloned().collect()
    }

    fn register(&self, plan: Plan) {
        self.plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(plan.id, Arc::new(Mutex::new(plan)));
    }

    /// Number of registered plans.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    /// True when no plan has been registered.
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    /// Registers a new plan in `created` status with one pending step per
    /// blueprint.
    ///
    /// The title and every blueprint are validated first; an invalid request
    /// allocates nothing.
    pub fn create_plan(
        &self,
        session_id: &str,
        title: &str,
        description: &str,
        blueprints: &[StepBlueprint],
        template_id: Option<u64>,
    ) -> Result<Plan> {
        if title.trim().is_empty() {
            return Err(
                HelpdeskError::invalid_input("title").with_reason("Plan title cannot be empty")
            );
        }
        validate_blueprints(blueprints)?;

        let id = self.next_plan_id.fetch_add(1, Ordering::Relaxed);
        let first_step_id = self
            .next_step_id
            .fetch_add(blueprints.len() as u64, Ordering::Relaxed);

        let steps = blueprints
            .iter()
            .enumerate()
            .map(|(position, blueprint)| Step {
                id: first_step_id + position as u64,
                plan_id: id,
                order: position as u32 + 1,
                title: blueprint.title.clone(),
                description: blueprint.description.clone(),
                status: StepStatus::Pending,
                error_message: None,
                started_at: None,
                completed_at: None,
            })
            .collect();

        let plan = Plan {
            id,
            session_id: session_id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            template_id,
            status: PlanStatus::Created,
            steps,
            created_at: Timestamp::now(),
            started_at: None,
            completed_at: None,
            revision: 0,
        };

        debug!(
            "Created plan {id} with {} steps for session {session_id}",
            plan.steps.len()
        );
        self.register(plan.clone());
        Ok(plan)
    }

    /// Instantiates a template as a new plan named after it.
    pub fn create_from_template(&self, session_id: &str, template: &Template) -> Result<Plan> {
        self.create_plan(
            session_id,
            &template.name,
            &template.description,
            &template.steps,
            Some(template.id),
        )
    }

    /// Snapshot of a plan.
    pub fn get_plan(&self, plan_id: u64) -> Option<Plan> {
        let handle = self.plan_handle(plan_id).ok()?;
        let plan = lock_plan(&handle).clone();
        Some(plan)
    }

    /// Every plan of a session, newest first.
    pub fn plans_for_session(&self, session_id: &str) -> Vec<Plan> {
        self.handles()
            .iter()
            .rev()
            .filter_map(|handle| {
                let plan = lock_plan(handle);
                (plan.session_id == session_id).then(|| plan.clone())
            })
            .collect()
    }

    /// The first in-progress plan of a session, in creation order.
    pub fn get_active_plan(&self, session_id: &str) -> Option<Plan> {
        self.handles().iter().find_map(|handle| {
            let plan = lock_plan(handle);
            (plan.session_id == session_id && plan.status == PlanStatus::InProgress)
                .then(|| plan.clone())
        })
    }

    /// Summary of the session's active plan for the AI collaborator.
    pub fn context_for_session(&self, session_id: &str) -> SessionTaskContext {
        self.get_active_plan(session_id)
            .map(|plan| SessionTaskContext::for_plan(&plan))
            .unwrap_or_default()
    }

    /// Re-registers persisted plans and moves the id allocators past the
    /// highest restored plan and step ids. A restored plan replaces any
    /// registered plan with the same id. Returns the number of plans
    /// restored.
    pub fn restore(&self, plans: Vec<Plan>) -> usize {
        let count = plans.len();
        for plan in plans {
            self.next_plan_id.fetch_max(plan.id + 1, Ordering::Relaxed);
            if let Some(max_step) = plan.steps.iter().map(|step| step.id).max() {
                self.next_step_id.fetch_max(max_step + 1, Ordering::Relaxed);
            }
            self.register(plan);
        }
        if count > 0 {
            info!("Restored {count} plans");
        }
        count
    }
}
