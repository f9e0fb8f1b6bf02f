use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use taskdeck::commands::*;
use taskdeck::store::TaskStore;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("tasks.json");
    env::set_var("TASKDECK_DB", db_path.to_str().unwrap());

    f(db_path.clone());

    env::remove_var("TASKDECK_DB");
}

fn load() -> TaskStore {
    let mut store = TaskStore::new();
    store.load().unwrap();
    store
}

#[test]
fn test_add_and_list() {
    with_test_db(|_path| {
        cmd_add(
            "Buy milk".into(),
            "high".into(),
            "groceries".into(),
            None,
            None,
            true,
        );

        let store = load();
        assert_eq!(store.len(), 1);
        let task = store.get(0).unwrap();
        assert_eq!(task.description, "Buy milk");
        assert_eq!(task.priority.as_str(), "HIGH");
        assert_eq!(task.category, "Groceries");
        assert_eq!(task.due_date, None);
        assert!(!task.completed);
    });
}

#[test]
fn test_add_with_due_and_notes() {
    with_test_db(|_path| {
        cmd_add(
            "Write report".into(),
            "medium".into(),
            "work".into(),
            Some("2025-12-01 09:30".into()),
            Some("outline first".into()),
            true,
        );

        let store = load();
        let task = store.get(0).unwrap();
        assert_eq!(
            task.due_date.map(|d| d.format("%Y-%m-%d %H:%M").to_string()),
            Some("2025-12-01 09:30".to_string())
        );
        assert_eq!(task.notes, "outline first");
    });
}

#[test]
fn test_add_rejects_bad_input_without_mutation() {
    with_test_db(|_path| {
        cmd_add("Task".into(), "urgent".into(), "home".into(), None, None, true);
        assert!(load().is_empty());

        cmd_add("".into(), "high".into(), "home".into(), None, None, true);
        assert!(load().is_empty());

        cmd_add(
            "Task".into(),
            "high".into(),
            "home".into(),
            Some("next tuesday".into()),
            None,
            true,
        );
        assert!(load().is_empty());
    });
}

#[test]
fn test_toggle_by_position() {
    with_test_db(|_path| {
        cmd_add("Buy milk".into(), "high".into(), "groceries".into(), None, None, true);

        cmd_toggle(1, true);
        assert!(load().get(0).unwrap().completed);

        cmd_toggle(1, true);
        assert!(!load().get(0).unwrap().completed);
    });
}

#[test]
fn test_remove_by_position() {
    with_test_db(|_path| {
        cmd_add("First".into(), "high".into(), "home".into(), None, None, true);
        cmd_add("Second".into(), "low".into(), "home".into(), None, None, true);

        cmd_remove(1, true);
        let store = load();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().description, "Second");
    });
}

#[test]
fn test_out_of_range_positions_leave_store_unchanged() {
    with_test_db(|_path| {
        cmd_remove(1, true);
        assert!(load().is_empty());

        cmd_add("Only".into(), "high".into(), "home".into(), None, None, true);
        cmd_remove(5, true);
        cmd_toggle(0, true); // position 0 is below the 1-based range
        cmd_notes(2, "nope".into(), true);

        let store = load();
        assert_eq!(store.len(), 1);
        assert!(!store.get(0).unwrap().completed);
        assert_eq!(store.get(0).unwrap().notes, "");
    });
}

#[test]
fn test_notes_by_position() {
    with_test_db(|_path| {
        cmd_add("Buy milk".into(), "high".into(), "groceries".into(), None, None, true);
        cmd_notes(1, "  the oat one  ".into(), true);
        assert_eq!(load().get(0).unwrap().notes, "the oat one");
    });
}

#[test]
fn test_sort_is_persisted_and_idempotent() {
    with_test_db(|_path| {
        cmd_add("call bob".into(), "LOW".into(), "Personal".into(), None, None, true);
        cmd_add("buy milk".into(), "high".into(), "groceries".into(), None, None, true);

        cmd_sort(true);
        let once: Vec<String> = load()
            .tasks()
            .iter()
            .map(|t| t.description.clone())
            .collect();
        // HIGH sorts before LOW by name
        assert_eq!(once, vec!["buy milk".to_string(), "call bob".to_string()]);

        cmd_sort(true);
        let twice: Vec<String> = load()
            .tasks()
            .iter()
            .map(|t| t.description.clone())
            .collect();
        assert_eq!(once, twice);
    });
}

#[test]
fn test_parse_due_formats() {
    assert!(parse_due("2025-12-01").is_ok());
    assert!(parse_due("2025-12-01 09:30").is_ok());
    assert!(parse_due("tomorrow").is_err());
    assert_eq!(
        parse_due("2025-12-01")
            .unwrap()
            .format("%H:%M")
            .to_string(),
        "00:00"
    );
}

#[test]
fn test_parse_priority_filter() {
    use taskdeck::models::Priority;
    assert_eq!(parse_priority_filter(None).unwrap(), None);
    assert_eq!(parse_priority_filter(Some("all")).unwrap(), None);
    assert_eq!(parse_priority_filter(Some("All")).unwrap(), None);
    assert_eq!(
        parse_priority_filter(Some("high")).unwrap(),
        Some(Priority::High)
    );
    assert!(parse_priority_filter(Some("urgent")).is_err());
}
