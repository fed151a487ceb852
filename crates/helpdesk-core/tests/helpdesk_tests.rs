mod common;

use common::{create_test_helpdesk, open_helpdesk};
use helpdesk_core::{
    HelpdeskError, PlanStatus, StepStatus,
    params::{
        CreateFromMessage, CreateFromTemplate, CreatePlan, FailStep, Id, Interaction,
        RecordFeedback, SearchKnowledge, Session, StepRef,
    },
};

fn session(id: &str) -> Session {
    Session {
        session_id: id.to_string(),
    }
}

#[tokio::test]
async fn test_printer_session_workflow() {
    let (_temp_dir, helpdesk) = create_test_helpdesk().await;

    // Knowledge lookup for the user's message
    let hits = helpdesk
        .search(&SearchKnowledge {
            query: "printer offline".to_string(),
            category: None,
        })
        .await;
    assert_eq!(hits[0].problem.title, "Printer Offline");

    // Plan from the same message
    let plan = helpdesk
        .create_plan_from_message(&CreateFromMessage {
            session_id: "s-1".to_string(),
            message: "My printer is offline again".to_string(),
        })
        .await
        .expect("Failed to create plan")
        .expect("Expected a template match");
    assert_eq!(plan.title, "Fix Printer Offline");
    assert_eq!(plan.template_id, Some(1));
    assert_eq!(plan.status, PlanStatus::Created);

    let plan = helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();
    assert_eq!(plan.steps[0].status, StepStatus::InProgress);

    // Walk every step, skipping the second
    let mut current = plan.steps[0].clone();
    for index in 0..plan.steps.len() {
        let step_ref = StepRef {
            plan_id: plan.id,
            step_id: current.id,
        };
        let transition = if index == 1 {
            helpdesk.skip_step(&step_ref).await.unwrap()
        } else {
            helpdesk.complete_step(&step_ref).await.unwrap()
        };

        match transition.next_step {
            Some(next) => current = next,
            None => {
                assert!(transition.is_complete);
                assert_eq!(index, plan.steps.len() - 1);
            }
        }
    }

    let finished = helpdesk.get_plan(&Id { id: plan.id }).await.unwrap();
    assert_eq!(finished.status, PlanStatus::Completed);
    assert!(finished.completed_at.is_some());
    assert_eq!(finished.steps[1].status, StepStatus::Skipped);
    assert!(helpdesk.active_plan(&session("s-1")).await.is_none());
}

#[tokio::test]
async fn test_state_survives_restart() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let db_path = temp_dir.path().join("helpdesk.db");

    let (plan_id, failed_id) = {
        let helpdesk = open_helpdesk(db_path.clone()).await;
        assert!(helpdesk.is_persistent());

        for success in [true, true, false] {
            helpdesk
                .record_feedback(&RecordFeedback {
                    solution_id: 1,
                    success,
                })
                .await
                .unwrap();
        }

        let plan = helpdesk
            .create_plan_from_template(&CreateFromTemplate {
                session_id: "s-1".to_string(),
                template_id: 3,
            })
            .await
            .unwrap();
        let plan = helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();
        helpdesk
            .complete_step(&StepRef {
                plan_id: plan.id,
                step_id: plan.steps[0].id,
            })
            .await
            .unwrap();

        let other = helpdesk
            .create_plan(&CreatePlan {
                session_id: "s-2".to_string(),
                title: "Reset password".to_string(),
                description: String::new(),
                steps: vec![helpdesk_core::StepBlueprint::new(
                    "Open portal",
                    "Go to the self-service portal",
                )],
                template_id: None,
            })
            .await
            .unwrap();
        let other = helpdesk.start_plan(&Id { id: other.id }).await.unwrap();
        helpdesk
            .fail_step(&FailStep {
                plan_id: other.id,
                step_id: other.steps[0].id,
                error_message: "Portal is down".to_string(),
            })
            .await
            .unwrap();

        (plan.id, other.id)
    };

    let helpdesk = open_helpdesk(db_path).await;

    let solution = helpdesk.get_solution(&Id { id: 1 }).await.unwrap();
    assert_eq!(solution.success_count, 2);
    assert_eq!(solution.failure_count, 1);

    let restored = helpdesk.get_plan(&Id { id: plan_id }).await.unwrap();
    assert_eq!(restored.status, PlanStatus::InProgress);
    assert_eq!(restored.steps.len(), 6);
    assert_eq!(restored.steps[0].status, StepStatus::Completed);
    assert_eq!(restored.steps[1].status, StepStatus::InProgress);

    let active = helpdesk.active_plan(&session("s-1")).await.unwrap();
    assert_eq!(active.id, plan_id);

    let failed = helpdesk.get_plan(&Id { id: failed_id }).await.unwrap();
    assert_eq!(failed.status, PlanStatus::Failed);
    assert_eq!(
        failed.steps[0].error_message.as_deref(),
        Some("Portal is down")
    );

    // Restored plans keep working and new IDs do not collide
    let transition = helpdesk
        .complete_step(&StepRef {
            plan_id,
            step_id: restored.steps[1].id,
        })
        .await
        .unwrap();
    assert_eq!(transition.next_step.unwrap().order, 3);

    let fresh = helpdesk
        .create_plan_from_template(&CreateFromTemplate {
            session_id: "s-3".to_string(),
            template_id: 2,
        })
        .await
        .unwrap();
    assert!(fresh.id > failed_id);
    assert!(
        fresh
            .steps
            .iter()
            .all(|step| restored.steps.iter().all(|old| old.id != step.id))
    );
}

#[tokio::test]
async fn test_errors_are_typed() {
    let (_temp_dir, helpdesk) = create_test_helpdesk().await;

    let err = helpdesk
        .record_feedback(&RecordFeedback {
            solution_id: 9_999,
            success: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HelpdeskError::SolutionNotFound { id: 9_999 }));

    let err = helpdesk
        .create_plan_from_template(&CreateFromTemplate {
            session_id: "s-1".to_string(),
            template_id: 404,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HelpdeskError::TemplateNotFound { id: 404 }));

    let err = helpdesk.start_plan(&Id { id: 77 }).await.unwrap_err();
    assert!(err.is_not_found());

    let plan = helpdesk
        .create_plan_from_template(&CreateFromTemplate {
            session_id: "s-1".to_string(),
            template_id: 1,
        })
        .await
        .unwrap();
    let err = helpdesk
        .complete_step(&StepRef {
            plan_id: plan.id,
            step_id: plan.steps[0].id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, HelpdeskError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_interaction_context_for_session() {
    let (_temp_dir, helpdesk) = create_test_helpdesk().await;

    let plan = helpdesk
        .create_plan_from_template(&CreateFromTemplate {
            session_id: "s-9".to_string(),
            template_id: 15,
        })
        .await
        .unwrap();
    helpdesk.start_plan(&Id { id: plan.id }).await.unwrap();

    let context = helpdesk
        .interaction_context(&Interaction {
            session_id: "s-9".to_string(),
            message: "vpn will not connect".to_string(),
        })
        .await
        .unwrap();

    assert!(context.knowledge.has_matches);
    assert_eq!(
        context.suggested_template.map(|m| m.template.name),
        Some("Fix VPN Connection".to_string())
    );
    assert!(context.tasks.has_active_plan);
    assert_eq!(context.tasks.plan.map(|p| p.id), Some(plan.id));
    assert_eq!(context.tasks.current_step.map(|s| s.order), Some(1));
}
