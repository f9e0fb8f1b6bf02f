use crate::models::{Priority, Task};

/// Aggregate counts over the current task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub high_priority: usize,
}

impl Stats {
    /// Derives the counts from the given tasks. Pure; nothing is cached, so
    /// the result always reflects the store's current state.
    pub fn of(tasks: &[Task]) -> Stats {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let high_priority = tasks
            .iter()
            .filter(|t| t.priority == Priority::High)
            .count();
        Stats {
            total,
            completed,
            pending: total - completed,
            high_priority,
        }
    }
}
