use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use tempfile::TempDir;
use tokio::sync::Notify;

use super::*;
use crate::{
    catalog::Catalog,
    models::{FeedbackRecord, PlanStatus, StepBlueprint, StepStatus},
    params::{
        CreateFromMessage, CreateFromTemplate, CreatePlan, FailStep, Id, Interaction,
        QuickSolutions, RecordFeedback, SearchKnowledge, Session, StepRef,
    },
    persistence::{Persistence, SqliteStore},
};

/// Keeps every write in memory so tests can inspect what was stored.
#[derive(Default)]
struct RecordingStore {
    feedback: Mutex<Vec<(u64, bool)>>,
    plans: Mutex<Vec<Plan>>,
    seed_feedback: Vec<FeedbackRecord>,
    seed_plans: Vec<Plan>,
}

impl Persistence for RecordingStore {
    fn persist_feedback(&self, solution_id: u64, success: bool) -> Result<()> {
        self.feedback.lock().unwrap().push((solution_id, success));
        Ok(())
    }

    fn persist_plan(&self, plan: &Plan) -> Result<()> {
        self.plans.lock().unwrap().push(plan.clone());
        Ok(())
    }

    fn load_all_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        Ok(self.seed_feedback.clone())
    }

    fn load_all_plans(&self) -> Result<Vec<Plan>> {
        Ok(self.seed_plans.clone())
    }
}

/// Fails every call.
struct BrokenStore;

impl Persistence for BrokenStore {
    fn persist_feedback(&self, _solution_id: u64, _success: bool) -> Result<()> {
        Err(HelpdeskError::Configuration {
            message: "store offline".to_string(),
        })
    }

    fn persist_plan(&self, _plan: &Plan) -> Result<()> {
        Err(HelpdeskError::Configuration {
            message: "store offline".to_string(),
        })
    }

    fn load_all_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        Err(HelpdeskError::Configuration {
            message: "store offline".to_string(),
        })
    }

    fn load_all_plans(&self) -> Result<Vec<Plan>> {
        Err(HelpdeskError::Configuration {
            message: "store offline".to_string(),
        })
    }
}

/// SQLite store that holds back the write of one plan revision.
struct DelayedStore {
    inner: SqliteStore,
    delayed_revision: u64,
    entered: Notify,
}

impl Persistence for DelayedStore {
    fn persist_feedback(&self, solution_id: u64, success: bool) -> Result<()> {
        self.inner.persist_feedback(solution_id, success)
    }

    fn persist_plan(&self, plan: &Plan) -> Result<()> {
        if plan.revision == self.delayed_revision {
            self.entered.notify_one();
            thread::sleep(Duration::from_millis(300));
        }
        self.inner.persist_plan(plan)
    }

    fn load_all_feedback(&self) -> Result<Vec<FeedbackRecord>> {
        self.inner.load_all_feedback()
    }

    fn load_all_plans(&self) -> Result<Vec<Plan>> {
        self.inner.load_all_plans()
    }
}

async fn create_with_store(store: Arc<dyn Persistence>) -> Helpdesk {
    HelpdeskBuilder::new()
        .with_persistence(store)
        .build()
        .await
        .expect("Failed to build helpdesk")
}

fn two_step_plan(session_id: &str) -> CreatePlan {
    CreatePlan {
        session_id: session_id.to_string(),
        title: "Fix printer".to_string(),
        description: "Printer offline".to_string(),
        steps: vec![
            StepBlueprint::new("A", "First thing"),
            StepBlueprint::new("B", "Second thing"),
        ],
        template_id: None,
    }
}

#[tokio::test]
async fn test_in_memory_helpdesk_uses_builtin_catalog() {
    let helpdesk = HelpdeskBuilder::new()
        .without_persistence()
        .build()
        .await
        .unwrap();

    assert!(!helpdesk.is_persistent());
    assert_eq!(helpdesk.list_templates(None).await.len(), 15);
    assert_eq!(helpdesk.categories().await[0], "Printer");

    let printer = helpdesk.get_problem(&Id { id: 1 }).await.unwrap();
    assert_eq!(printer.title, "Printer Offline");
    let solution_ids: Vec<u64> = printer.solutions.iter().map(|s| s.id).collect();
    assert_eq!(solution_ids, vec![1, 2]);
}

#[tokio::test]
async fn test_custom_catalog() {
    let catalog = Catalog::from_json_str(
        r#"{
            "problems": [{
                "category": "Phone",
                "title": "No Dial Tone",
                "description": "Desk phone is silent",
                "keywords": ["phone", "dial tone"],
                "solutions": [{ "title": "Replug", "steps": ["Replug the cord"] }]
            }]
        }"#,
    )
    .unwrap();

    let helpdesk = HelpdeskBuilder::new()
        .with_catalog(catalog)
        .without_persistence()
        .build()
        .await
        .unwrap();

    assert_eq!(helpdesk.categories().await, vec!["Phone"]);
    assert!(helpdesk.list_templates(None).await.is_empty());
    let results = helpdesk
        .search(&SearchKnowledge {
            query: "my phone".to_string(),
            category: None,
        })
        .await;
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_feedback_is_counted_and_persisted() {
    let store = Arc::new(RecordingStore::default());
    let helpdesk = create_with_store(store.clone()).await;

    for success in [true, true, true, false] {
        helpdesk
            .record_feedback(&RecordFeedback {
                solution_id: 3,
                success,
            })
            .await
            .unwrap();
    }

    let solution = helpdesk.get_solution(&Id { id: 3 }).await.unwrap();
    assert_eq!(solution.success_count, 3);
    assert_eq!(solution.failure_count, 1);
    assert_eq!(solution.success_rate(), 0.75);
    assert_eq!(
        *store.feedback.lock().unwrap(),
        vec![(3, true), (3, true), (3, true), (3, false)]
    );

    let quick = helpdesk.quick_solutions(&QuickSolutions::default()).await;
    assert_eq!(quick.len(), 1);
    assert_eq!(quick[0].solution.id, 3);

    let err = helpdesk
        .record_feedback(&RecordFeedback {
            solution_id: 999,
            success: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HelpdeskError::SolutionNotFound { id: 999 }));
    assert_eq!(store.feedback.lock().unwrap().len(), 4);
}

#[tokio::test]
async fn test_failing_store_does_not_fail_operations() {
    let helpdesk = create_with_store(Arc::new(BrokenStore)).await;

    let solution = helpdesk
        .record_feedback(&RecordFeedback {
            solution_id: 1,
            success: true,
        })
        .await
        .unwrap();
    assert_eq!(solution.success_count, 1);

    let plan = helpdesk.create_plan(&two_step_plan("s")).await.unwrap();
    let plan = helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();
    let transition = helpdesk
        .complete_step(&StepRef {
            plan_id: plan.id,
            step_id: plan.steps[0].id,
        })
        .await
        .unwrap();
    assert_eq!(transition.step.status, StepStatus::Completed);
    assert_eq!(
        helpdesk.get_plan(&Id { id: plan.id }).await.unwrap(),
        transition.plan
    );
}

#[tokio::test]
async fn test_every_plan_change_is_persisted() {
    let store = Arc::new(RecordingStore::default());
    let helpdesk = create_with_store(store.clone()).await;

    let plan = helpdesk.create_plan(&two_step_plan("s")).await.unwrap();
    helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();
    helpdesk
        .skip_step(&StepRef {
            plan_id: plan.id,
            step_id: plan.steps[0].id,
        })
        .await
        .unwrap();
    helpdesk
        .fail_step(&FailStep {
            plan_id: plan.id,
            step_id: plan.steps[1].id,
            error_message: "Paper jam".to_string(),
        })
        .await
        .unwrap();

    let stored = store.plans.lock().unwrap();
    let statuses: Vec<PlanStatus> = stored.iter().map(|p| p.status).collect();
    assert_eq!(
        statuses,
        vec![
            PlanStatus::Created,
            PlanStatus::InProgress,
            PlanStatus::InProgress,
            PlanStatus::Failed
        ]
    );
    assert_eq!(
        stored[3].steps[1].error_message.as_deref(),
        Some("Paper jam")
    );
}

#[tokio::test]
async fn test_late_write_of_older_state_does_not_win() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("helpdesk.db");
    let store = Arc::new(DelayedStore {
        inner: SqliteStore::open(&db_path).unwrap(),
        // create = 0, start = 1, first completion = 2
        delayed_revision: 2,
        entered: Notify::new(),
    });
    let helpdesk = Arc::new(create_with_store(store.clone()).await);

    let plan = helpdesk.create_plan(&two_step_plan("s")).await.unwrap();
    let plan = helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();

    let first = {
        let helpdesk = Arc::clone(&helpdesk);
        let step = StepRef {
            plan_id: plan.id,
            step_id: plan.steps[0].id,
        };
        tokio::spawn(async move { helpdesk.complete_step(&step).await })
    };

    // The first completion is applied in memory and its write is stalled
    store.entered.notified().await;
    let last = helpdesk
        .complete_step(&StepRef {
            plan_id: plan.id,
            step_id: plan.steps[1].id,
        })
        .await
        .unwrap();
    assert!(last.is_complete);
    first.await.unwrap().unwrap();

    let stored = store.inner.load_all_plans().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, PlanStatus::Completed);
    assert_eq!(stored[0].revision, last.plan.revision);

    let reopened = HelpdeskBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .unwrap();
    let restored = reopened.get_plan(&Id { id: plan.id }).await.unwrap();
    assert_eq!(restored.status, PlanStatus::Completed);
    assert!(reopened
        .active_plan(&Session {
            session_id: "s".to_string()
        })
        .await
        .is_none());
}

#[tokio::test]
async fn test_rejected_operations_are_not_persisted() {
    let store = Arc::new(RecordingStore::default());
    let helpdesk = create_with_store(store.clone()).await;

    let mut params = two_step_plan("s");
    params.steps[0].title = "  ".to_string();
    let err = helpdesk.create_plan(&params).await.unwrap_err();
    assert!(matches!(err, HelpdeskError::InvalidInput { .. }));

    let err = helpdesk.start_plan(&Id { id: 1 }).await.unwrap_err();
    assert!(err.is_not_found());

    assert!(store.plans.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_bootstrap_seeds_from_store() {
    let source = HelpdeskBuilder::new()
        .without_persistence()
        .build()
        .await
        .unwrap();
    let plan = source.create_plan(&two_step_plan("s")).await.unwrap();
    let plan = source.start_plan(&Id { id: plan.id }).await.unwrap();

    let store = Arc::new(RecordingStore {
        seed_feedback: vec![FeedbackRecord {
            solution_id: 2,
            success_count: 5,
            failure_count: 5,
        }],
        seed_plans: vec![plan.clone()],
        ..RecordingStore::default()
    });
    let helpdesk = create_with_store(store).await;

    let solution = helpdesk.get_solution(&Id { id: 2 }).await.unwrap();
    assert_eq!(solution.success_rate(), 0.5);

    let session = Session {
        session_id: "s".to_string(),
    };
    assert_eq!(helpdesk.active_plan(&session).await, Some(plan.clone()));

    let next = helpdesk.create_plan(&two_step_plan("s")).await.unwrap();
    assert_eq!(next.id, plan.id + 1);
}

#[tokio::test]
async fn test_stored_feedback_follows_solution_ids_of_the_catalog() {
    let catalog = Catalog::from_json_str(
        r#"{
            "problems": [{
                "category": "Phone",
                "title": "No Dial Tone",
                "description": "Desk phone is silent",
                "keywords": ["phone"],
                "solutions": [{ "title": "Replug", "steps": ["Replug the cord"] }]
            }]
        }"#,
    )
    .unwrap();
    let store = Arc::new(RecordingStore {
        seed_feedback: vec![
            FeedbackRecord {
                solution_id: 1,
                success_count: 3,
                failure_count: 1,
            },
            FeedbackRecord {
                solution_id: 7,
                success_count: 9,
                failure_count: 0,
            },
        ],
        ..RecordingStore::default()
    });

    let helpdesk = HelpdeskBuilder::new()
        .with_catalog(catalog)
        .with_persistence(store)
        .build()
        .await
        .unwrap();

    // Solution 1 of this catalog takes the counters stored under id 1
    let solution = helpdesk.get_solution(&Id { id: 1 }).await.unwrap();
    assert_eq!(solution.title, "Replug");
    assert_eq!(solution.success_rate(), 0.75);
    // Counters for ids the catalog does not have are dropped
    assert!(helpdesk.get_solution(&Id { id: 7 }).await.is_none());
}

#[tokio::test]
async fn test_store_that_fails_to_load_starts_empty() {
    let helpdesk = create_with_store(Arc::new(BrokenStore)).await;

    let solution = helpdesk.get_solution(&Id { id: 1 }).await.unwrap();
    assert_eq!(solution.uses(), 0);
    assert!(helpdesk
        .list_plans(&Session {
            session_id: "s".to_string()
        })
        .await
        .is_empty());
}

#[tokio::test]
async fn test_create_plan_from_template_and_message() {
    let helpdesk = HelpdeskBuilder::new()
        .without_persistence()
        .build()
        .await
        .unwrap();

    let plan = helpdesk
        .create_plan_from_template(&CreateFromTemplate {
            session_id: "s".to_string(),
            template_id: 3,
        })
        .await
        .unwrap();
    assert_eq!(plan.title, "Fix No Internet");
    assert_eq!(plan.template_id, Some(3));
    assert_eq!(plan.steps.len(), 6);

    let err = helpdesk
        .create_plan_from_template(&CreateFromTemplate {
            session_id: "s".to_string(),
            template_id: 99,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HelpdeskError::TemplateNotFound { id: 99 }));

    let plan = helpdesk
        .create_plan_from_message(&CreateFromMessage {
            session_id: "s".to_string(),
            message: "My printer is offline".to_string(),
        })
        .await
        .unwrap()
        .expect("printer template matches");
    assert_eq!(plan.template_id, Some(1));

    let none = helpdesk
        .create_plan_from_message(&CreateFromMessage {
            session_id: "s".to_string(),
            message: "hello".to_string(),
        })
        .await
        .unwrap();
    assert!(none.is_none());

    let titles: Vec<String> = helpdesk
        .list_plans(&Session {
            session_id: "s".to_string(),
        })
        .await
        .into_iter()
        .map(|plan| plan.title)
        .collect();
    assert_eq!(titles, vec!["Fix Printer Offline", "Fix No Internet"]);
}

#[tokio::test]
async fn test_interaction_context() {
    let helpdesk = HelpdeskBuilder::new()
        .without_persistence()
        .build()
        .await
        .unwrap();

    let params = Interaction {
        session_id: "s".to_string(),
        message: "My printer is offline".to_string(),
    };

    let context = helpdesk.interaction_context(&params).await.unwrap();
    assert!(context.knowledge.has_matches);
    assert_eq!(context.knowledge.problems[0].problem.title, "Printer Offline");
    assert!(context.knowledge.top_solutions.len() <= 5);
    assert_eq!(
        context.suggested_template.unwrap().template.name,
        "Fix Printer Offline"
    );
    assert!(!context.tasks.has_active_plan);

    let plan = helpdesk.create_plan(&two_step_plan("s")).await.unwrap();
    helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();

    let context = helpdesk.interaction_context(&params).await.unwrap();
    assert!(context.tasks.has_active_plan);
    assert_eq!(context.tasks.current_step.unwrap().title, "A");

    let context = helpdesk
        .interaction_context(&Interaction {
            session_id: "other".to_string(),
            message: "zzz".to_string(),
        })
        .await
        .unwrap();
    assert!(!context.knowledge.has_matches);
    assert!(context.suggested_template.is_none());
    assert!(!context.tasks.has_active_plan);
}

#[tokio::test]
async fn test_concurrent_feedback_through_facade() {
    let helpdesk = Arc::new(
        HelpdeskBuilder::new()
            .without_persistence()
            .build()
            .await
            .unwrap(),
    );

    let mut handles = Vec::new();
    for i in 0..50 {
        let helpdesk = Arc::clone(&helpdesk);
        handles.push(tokio::spawn(async move {
            helpdesk
                .record_feedback(&RecordFeedback {
                    solution_id: 10,
                    success: i % 5 != 0,
                })
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let solution = helpdesk.get_solution(&Id { id: 10 }).await.unwrap();
    assert_eq!(solution.success_count, 40);
    assert_eq!(solution.failure_count, 10);
}
