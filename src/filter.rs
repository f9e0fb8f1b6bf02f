use crate::models::{Priority, Task};

/// The active view filters: search text plus category and priority narrowing.
///
/// `None` means "All" for both narrowing filters. The filtered view is a pure
/// function of the store contents and these inputs; it is recomputed on every
/// call and never re-sorts.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    /// Case-insensitive substring match against description and notes.
    pub search: String,
    /// Exact category match, or `None` for all categories.
    pub category: Option<String>,
    /// Exact priority match, or `None` for all priorities.
    pub priority: Option<Priority>,
}

impl Filters {
    pub fn new() -> Filters {
        Filters::default()
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.category.is_none() && self.priority.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !task.description.to_lowercase().contains(&needle)
                && !task.notes.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if task.category != *category {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        true
    }

    /// The tasks passing the filter, in the order they appear in `tasks`.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }

    /// Like [`Filters::apply`], but each task is paired with its position in
    /// the full sequence so selections stay valid while filters are active.
    pub fn apply_indexed<'a>(&self, tasks: &'a [Task]) -> Vec<(usize, &'a Task)> {
        tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| self.matches(t))
            .collect()
    }
}
