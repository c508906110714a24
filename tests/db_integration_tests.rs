//! Integration tests for the database layer.
//!
//! These tests run the task store operations against an in-memory SQLite database.

use task_board::db::Database;
use task_board::types::RECENT_TASK_LIMIT;

/// Helper to create a fresh in-memory database for testing.
fn setup_db() -> Database {
    Database::open_in_memory().expect("Failed to create in-memory database")
}

mod create_tests {
    use super::*;

    #[test]
    fn create_assigns_id_and_defaults() {
        let db = setup_db();

        let id = db
            .create_task(Some("T"), Some("D"))
            .expect("Failed to create task");

        let task = db.get_task(id).unwrap().expect("task should exist");
        assert_eq!(task.id, id);
        assert_eq!(task.title, "T");
        assert_eq!(task.description.as_deref(), Some("D"));
        assert!(!task.is_completed);

        let all = db.list_all_tasks().unwrap();
        assert!(all.iter().any(|t| t.id == id));
        let recent = db.list_recent_tasks(RECENT_TASK_LIMIT).unwrap();
        assert!(recent.iter().any(|t| t.id == id));
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let db = setup_db();

        let first = db.create_task(Some("a"), None).unwrap();
        let second = db.create_task(Some("b"), None).unwrap();
        assert_ne!(first, second);

        db.delete_task(second).unwrap();
        let third = db.create_task(Some("c"), None).unwrap();
        assert!(third > second, "deleted ids must not be handed out again");
    }

    #[test]
    fn description_is_optional() {
        let db = setup_db();
        let id = db.create_task(Some("no description"), None).unwrap();
        assert!(db.get_task(id).unwrap().unwrap().description.is_none());
    }

    #[test]
    fn missing_title_is_rejected_by_store() {
        let db = setup_db();
        assert!(db.create_task(None, Some("D")).is_err());
        assert!(db.list_all_tasks().unwrap().is_empty());
    }
}

mod list_tests {
    use super::*;

    #[test]
    fn lists_are_newest_first() {
        let db = setup_db();
        let ids: Vec<i64> = (0..3)
            .map(|i| db.create_task(Some(&format!("task {}", i)), None).unwrap())
            .collect();

        let all: Vec<i64> = db.list_all_tasks().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(all, vec![ids[2], ids[1], ids[0]]);
    }

    #[test]
    fn recent_is_capped_at_limit() {
        let db = setup_db();
        for i in 0..8 {
            db.create_task(Some(&format!("task {}", i)), None).unwrap();
        }

        let recent = db.list_recent_tasks(RECENT_TASK_LIMIT).unwrap();
        assert_eq!(recent.len(), RECENT_TASK_LIMIT);
        assert_eq!(recent[0].title, "task 7");
        assert_eq!(db.list_all_tasks().unwrap().len(), 8);
    }

    #[test]
    fn recent_excludes_completed() {
        let db = setup_db();
        let done = db.create_task(Some("done"), None).unwrap();
        let pending = db.create_task(Some("pending"), None).unwrap();
        db.mark_task_done(done).unwrap();

        let recent = db.list_recent_tasks(RECENT_TASK_LIMIT).unwrap();
        assert!(recent.iter().all(|t| !t.is_completed));
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, pending);

        // Completed tasks still appear in the full list.
        assert_eq!(db.list_all_tasks().unwrap().len(), 2);
    }
}

mod update_tests {
    use super::*;

    #[test]
    fn update_changes_only_title_and_description() {
        let db = setup_db();
        let id = db.create_task(Some("old"), Some("old desc")).unwrap();
        db.mark_task_done(id).unwrap();
        let before = db.get_task(id).unwrap().unwrap();

        let affected = db.update_task(id, Some("new"), Some("new desc")).unwrap();
        assert_eq!(affected, 1);

        let after = db.get_task(id).unwrap().unwrap();
        assert_eq!(after.title, "new");
        assert_eq!(after.description.as_deref(), Some("new desc"));
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.is_completed, before.is_completed);
    }

    #[test]
    fn update_missing_id_touches_nothing() {
        let db = setup_db();
        assert_eq!(db.update_task(404, Some("x"), None).unwrap(), 0);
    }

    #[test]
    fn mark_done_is_idempotent() {
        let db = setup_db();
        let id = db.create_task(Some("twice"), None).unwrap();

        assert_eq!(db.mark_task_done(id).unwrap(), 1);
        assert_eq!(db.mark_task_done(id).unwrap(), 1);
        assert!(db.get_task(id).unwrap().unwrap().is_completed);
    }

    #[test]
    fn mark_done_missing_id_touches_nothing() {
        let db = setup_db();
        assert_eq!(db.mark_task_done(404).unwrap(), 0);
    }
}

mod delete_tests {
    use super::*;

    #[test]
    fn delete_removes_row() {
        let db = setup_db();
        let id = db.create_task(Some("gone"), None).unwrap();

        assert_eq!(db.delete_task(id).unwrap(), 1);
        assert!(db.get_task(id).unwrap().is_none());
        assert!(db.list_all_tasks().unwrap().iter().all(|t| t.id != id));
    }

    #[test]
    fn delete_missing_id_reports_zero_rows() {
        let db = setup_db();
        assert_eq!(db.delete_task(404).unwrap(), 0);
    }
}

mod file_tests {
    use super::*;

    #[test]
    fn tasks_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.db");

        let db = Database::open(&path).unwrap();
        let id = db.create_task(Some("persisted"), None).unwrap();
        db.close().unwrap();

        let db = Database::open(&path).unwrap();
        let task = db.get_task(id).unwrap().expect("task should survive reopen");
        assert_eq!(task.title, "persisted");
    }
}
