use std::fs;

use chrono::NaiveDate;
use taskdeck::error::Error;
use taskdeck::models::CategoryColor;
use taskdeck::store::TaskStore;

fn populated_store() -> TaskStore {
    let mut store = TaskStore::new();
    store
        .add_task("Buy milk", "high", "groceries", None)
        .unwrap();
    store
        .add_task("Call bob", "LOW", "Personal", None)
        .unwrap();
    store
}

#[test]
fn test_add_appends_at_end() {
    let mut store = populated_store();
    store.add_task("Water plants", "medium", "home", None).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(2).unwrap().description, "Water plants");
}

#[test]
fn test_add_validates_before_mutation() {
    let mut store = TaskStore::new();
    assert!(store.add_task("", "high", "home", None).is_err());
    assert!(store.add_task("Task", "urgent", "home", None).is_err());
    assert!(store.add_task("Task", "high", "   ", None).is_err());
    // nothing partial ever lands in the store
    assert!(store.is_empty());
}

#[test]
fn test_duplicates_coexist_as_separate_entries() {
    let mut store = TaskStore::new();
    store.add_task("Buy milk", "high", "groceries", None).unwrap();
    store.add_task("Buy milk", "HIGH", "Groceries", None).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).unwrap(), store.get(1).unwrap());
}

#[test]
fn test_remove_out_of_range_is_notfound_and_leaves_store_unchanged() {
    let mut empty = TaskStore::new();
    assert!(matches!(empty.remove(0), Err(Error::NotFound { .. })));

    let mut store = populated_store();
    assert!(matches!(store.remove(5), Err(Error::NotFound { .. })));
    assert_eq!(store.len(), 2);

    let removed = store.remove(0).unwrap();
    assert_eq!(removed.description, "Buy milk");
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(0).unwrap().description, "Call bob");
}

#[test]
fn test_toggle_complete() {
    let mut store = populated_store();
    store.toggle_complete(0).unwrap();
    assert!(store.get(0).unwrap().completed);
    store.toggle_complete(0).unwrap();
    assert!(!store.get(0).unwrap().completed);
    assert!(matches!(
        store.toggle_complete(9),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_set_notes_trims() {
    let mut store = populated_store();
    store.set_notes(1, "  ring after lunch  ").unwrap();
    assert_eq!(store.get(1).unwrap().notes, "ring after lunch");
}

#[test]
fn test_setters_keep_invariants() {
    let mut store = populated_store();
    store.set_category(0, "dAiRy").unwrap();
    assert_eq!(store.get(0).unwrap().category, "Dairy");
    assert!(store.set_category(0, " ").is_err());
    assert!(store.set_priority(0, "urgent").is_err());
    store.set_priority(0, "low").unwrap();
    assert_eq!(store.get(0).unwrap().priority.as_str(), "LOW");
}

#[test]
fn test_distinct_categories_sorted() {
    let mut store = populated_store();
    store.add_task("More milk", "low", "groceries", None).unwrap();
    store.add_task("Vacuum", "low", "home", None).unwrap();
    assert_eq!(
        store.distinct_categories(),
        vec!["Groceries".to_string(), "Home".to_string(), "Personal".to_string()]
    );
}

#[test]
fn test_sort_persists_order_rules() {
    let mut store = TaskStore::new();
    store.add_task("call bob", "LOW", "Personal", None).unwrap();
    store.add_task("buy milk", "high", "groceries", None).unwrap();
    store.toggle_complete(0).unwrap();
    store
        .add_task(
            "pay rent",
            "medium",
            "home",
            NaiveDate::from_ymd_opt(2025, 12, 1).and_then(|d| d.and_hms_opt(9, 0, 0)),
        )
        .unwrap();

    store.sort();
    let order: Vec<&str> = store.tasks().iter().map(|t| t.description.as_str()).collect();
    // incomplete first (buy milk HIGH, pay rent MEDIUM by name), completed last
    assert_eq!(order, vec!["buy milk", "pay rent", "call bob"]);
}

#[test]
fn test_round_trip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let mut store = TaskStore::new();
    store
        .add_task(
            "Buy milk",
            "high",
            "groceries",
            NaiveDate::from_ymd_opt(2025, 12, 1).and_then(|d| d.and_hms_opt(9, 30, 0)),
        )
        .unwrap();
    store.set_notes(0, "the oat one").unwrap();
    store
        .set_category_color(
            0,
            CategoryColor {
                r: 12,
                g: 200,
                b: 7,
                a: 128,
            },
        )
        .unwrap();
    store.add_task("Call bob", "low", "personal", None).unwrap();
    store.toggle_complete(1).unwrap();
    store.save_to(&path).unwrap();

    let mut reloaded = TaskStore::new();
    reloaded.load_from(&path).unwrap();
    assert_eq!(reloaded.len(), store.len());
    for (a, b) in store.tasks().iter().zip(reloaded.tasks()) {
        assert_eq!(a.description, b.description);
        assert_eq!(a.priority, b.priority);
        assert_eq!(a.category, b.category);
        assert_eq!(a.due_date, b.due_date);
        assert_eq!(a.completed, b.completed);
        assert_eq!(a.notes, b.notes);
        assert_eq!(a.created_at, b.created_at);
        assert_eq!(a.category_color, b.category_color);
    }
}

#[test]
fn test_load_missing_file_is_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TaskStore::new();
    store.load_from(&dir.path().join("nope.json")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_load_corrupt_file_keeps_prior_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "{ not json").unwrap();

    let mut store = populated_store();
    let err = store.load_from(&path).unwrap_err();
    assert!(err.is_io());
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(0).unwrap().description, "Buy milk");
}
