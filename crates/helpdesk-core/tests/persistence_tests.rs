use helpdesk_core::{
    Persistence, SqliteStore, StepBlueprint, TaskPlanEngine, models::FeedbackRecord,
};
use tempfile::TempDir;

#[test]
fn test_sqlite_store_reopens_with_data() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("store.db");

    let engine = TaskPlanEngine::new();
    let plan = engine
        .create_plan(
            "s-1",
            "Map network drive",
            "Drive letter missing",
            &[
                StepBlueprint::new("Open Explorer", "Open File Explorer"),
                StepBlueprint::new("Map drive", "Use Map network drive"),
            ],
            None,
        )
        .unwrap();

    {
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.path(), path.as_path());
        store.persist_feedback(5, true).unwrap();
        store.persist_feedback(5, false).unwrap();
        store.persist_feedback(8, true).unwrap();
        store.persist_plan(&plan).unwrap();

        // A later snapshot replaces the earlier one
        let started = engine.start_plan(plan.id).unwrap();
        store.persist_plan(&started).unwrap();

        // ...and the earlier one arriving late changes nothing
        store.persist_plan(&plan).unwrap();
    }

    let store: Box<dyn Persistence> = Box::new(SqliteStore::open(&path).unwrap());

    let mut feedback = store.load_all_feedback().unwrap();
    feedback.sort_by_key(|record| record.solution_id);
    assert_eq!(
        feedback,
        vec![
            FeedbackRecord {
                solution_id: 5,
                success_count: 1,
                failure_count: 1,
            },
            FeedbackRecord {
                solution_id: 8,
                success_count: 1,
                failure_count: 0,
            },
        ]
    );

    let plans = store.load_all_plans().unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0], engine.get_plan(plan.id).unwrap());
}

#[test]
fn test_open_fails_for_directory() {
    let temp_dir = TempDir::new().unwrap();
    assert!(SqliteStore::open(temp_dir.path()).is_err());
}
