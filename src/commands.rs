use chrono::{NaiveDate, NaiveDateTime};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::error::{Error, Result};
use crate::filter::Filters;
use crate::models::{Priority, DUE_FORMAT};
use crate::stats::Stats;
use crate::store::TaskStore;

/// Parses a due date given as `YYYY-MM-DD HH:MM` or bare `YYYY-MM-DD`
/// (midnight).
pub fn parse_due(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DUE_FORMAT) {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap())
        .map_err(|e| {
            Error::validation(format!(
                "invalid due date '{}': {}. Use YYYY-MM-DD or YYYY-MM-DD HH:MM.",
                s, e
            ))
        })
}

/// Parses a priority filter argument; `All` (any case) or absence means no
/// narrowing.
pub fn parse_priority_filter(arg: Option<&str>) -> Result<Option<Priority>> {
    match arg {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

fn load_store(silent: bool) -> Option<TaskStore> {
    let mut store = TaskStore::new();
    if let Err(e) = store.load() {
        if !silent {
            eprintln!("Failed to load tasks: {}", e);
        }
        return None;
    }
    Some(store)
}

/// Maps a 1-based position (as printed by `list`) onto a store index.
fn index_of(pos: usize) -> usize {
    // 0 wraps to usize::MAX, which the store rejects as out of range.
    pos.wrapping_sub(1)
}

/// Adds a new task to the database.
pub fn cmd_add(
    description: String,
    priority: String,
    category: String,
    due: Option<String>,
    notes: Option<String>,
    silent: bool,
) {
    let due_date = match due.as_deref().map(parse_due).transpose() {
        Ok(d) => d,
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };

    let Some(mut store) = load_store(silent) else { return };
    let summary = match store.add_task(&description, &priority, &category, due_date) {
        Ok(task) => task.to_string(),
        Err(e) => {
            if !silent { eprintln!("{}", e); }
            return;
        }
    };
    if let Some(notes) = notes {
        let last = store.len() - 1;
        let _ = store.set_notes(last, &notes);
    }
    if let Err(e) = store.save() {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Added {}", summary);
    }
}

/// Removes the task at the given list position.
pub fn cmd_remove(pos: usize, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    match store.remove(index_of(pos)) {
        Ok(task) => {
            if let Err(e) = store.save() {
                if !silent { eprintln!("Failed to save tasks: {}", e); }
            } else if !silent {
                println!("Removed {}", task);
            }
        }
        Err(_) => {
            if !silent { eprintln!("No task at position {}.", pos); }
        }
    }
}

/// Toggles the completed flag of the task at the given list position.
pub fn cmd_toggle(pos: usize, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    let index = index_of(pos);
    match store.toggle_complete(index) {
        Ok(()) => {
            if let Err(e) = store.save() {
                if !silent { eprintln!("Failed to save tasks: {}", e); }
            } else if !silent {
                // get() cannot fail here, toggle_complete checked the index
                if let Ok(task) = store.get(index) {
                    println!("{}", task);
                }
            }
        }
        Err(_) => {
            if !silent { eprintln!("No task at position {}.", pos); }
        }
    }
}

/// Overwrites the notes of the task at the given list position.
pub fn cmd_notes(pos: usize, text: String, silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    match store.set_notes(index_of(pos), &text) {
        Ok(()) => {
            if let Err(e) = store.save() {
                if !silent { eprintln!("Failed to save tasks: {}", e); }
            } else if !silent {
                println!("Notes updated for task {}.", pos);
            }
        }
        Err(_) => {
            if !silent { eprintln!("No task at position {}.", pos); }
        }
    }
}

/// Sorts the task list in place and persists the new order.
pub fn cmd_sort(silent: bool) {
    let Some(mut store) = load_store(silent) else { return };
    store.sort();
    if let Err(e) = store.save() {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
    } else if !silent {
        println!("Tasks sorted.");
    }
}

/// Lists tasks in a formatted table, optionally narrowed by search text,
/// category and priority.
///
/// The `#` column is each task's position in the full sequence, so positions
/// printed under an active filter are still valid arguments for `remove`,
/// `done` and `notes`.
pub fn cmd_list(search: Option<String>, category: Option<String>, priority: Option<String>) {
    let priority = match parse_priority_filter(priority.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let filters = Filters {
        search: search.unwrap_or_default(),
        category: category.filter(|c| !c.eq_ignore_ascii_case("all")),
        priority,
    };

    let Some(store) = load_store(false) else { return };
    let visible = filters.apply_indexed(store.tasks());
    if visible.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Notes").add_attribute(Attribute::Bold),
        ]);

    for (index, t) in visible {
        let priority_color = match t.priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        let status = if t.completed { "✓ Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };
        let due = t
            .due_date
            .map(|d| d.format(DUE_FORMAT).to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(status).fg(status_color),
            Cell::new(t.priority).fg(priority_color),
            Cell::new(&t.description),
            Cell::new(&t.category),
            Cell::new(due),
            Cell::new(&t.notes),
        ]);
    }

    println!("{table}");
}

/// Prints aggregate counts over the whole task list.
pub fn cmd_stats() {
    let Some(store) = load_store(false) else { return };
    let stats = Stats::of(store.tasks());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new("Completed").add_attribute(Attribute::Bold),
        Cell::new("Pending").add_attribute(Attribute::Bold),
        Cell::new("High Priority").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new(stats.total),
        Cell::new(stats.completed).fg(Color::Green),
        Cell::new(stats.pending).fg(Color::Yellow),
        Cell::new(stats.high_priority).fg(Color::Red),
    ]);
    println!("{table}");
}

/// Prints the distinct categories currently in use.
pub fn cmd_categories() {
    let Some(store) = load_store(false) else { return };
    let categories = store.distinct_categories();
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }
    for c in categories {
        println!("{}", c);
    }
}
