use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::{CategoryColor, Priority, Task};

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `TASKDECK_DB` environment variable.
/// 2. `~/.local/share/taskdeck/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
pub fn db_path() -> PathBuf {
    std::env::var("TASKDECK_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskdeck");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.json");
        p
    })
}

/// The authoritative, insertion-ordered list of tasks.
///
/// Owns every mutation and the whole-collection load/save. Single writer,
/// single thread; no locking.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> TaskStore {
        TaskStore { tasks: Vec::new() }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Validates, normalizes and appends a new task, returning a reference to
    /// it. Duplicates (same description/priority/category) are allowed; the
    /// list keeps them as separate entries.
    pub fn add_task(
        &mut self,
        description: &str,
        priority: &str,
        category: &str,
        due_date: Option<NaiveDateTime>,
    ) -> Result<&Task> {
        let priority: Priority = priority.parse()?;
        let mut task = Task::new(description, priority, category)?;
        task.due_date = due_date;
        self.tasks.push(task);
        Ok(self.tasks.last().unwrap())
    }

    /// Appends an already-built task.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        self.tasks.get(index).ok_or(Error::NotFound {
            index,
            len: self.tasks.len(),
        })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks.get_mut(index).ok_or(Error::NotFound { index, len })
    }

    /// Removes and returns the task at `index`. The store is left unchanged
    /// when the index is out of range.
    pub fn remove(&mut self, index: usize) -> Result<Task> {
        if index >= self.tasks.len() {
            return Err(Error::NotFound {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(self.tasks.remove(index))
    }

    pub fn toggle_complete(&mut self, index: usize) -> Result<()> {
        let task = self.get_mut(index)?;
        task.completed = !task.completed;
        Ok(())
    }

    pub fn set_notes(&mut self, index: usize, notes: &str) -> Result<()> {
        self.get_mut(index)?.set_notes(notes);
        Ok(())
    }

    pub fn set_description(&mut self, index: usize, description: &str) -> Result<()> {
        self.get_mut(index)?.set_description(description)
    }

    pub fn set_category(&mut self, index: usize, category: &str) -> Result<()> {
        self.get_mut(index)?.set_category(category)
    }

    pub fn set_priority(&mut self, index: usize, priority: &str) -> Result<()> {
        let priority: Priority = priority.parse()?;
        self.get_mut(index)?.priority = priority;
        Ok(())
    }

    pub fn set_due_date(&mut self, index: usize, due_date: Option<NaiveDateTime>) -> Result<()> {
        self.get_mut(index)?.due_date = due_date;
        Ok(())
    }

    pub fn set_category_color(&mut self, index: usize, color: CategoryColor) -> Result<()> {
        self.get_mut(index)?.category_color = color;
        Ok(())
    }

    /// Sorts the list in place by the task display ordering. Stable, so equal
    /// tasks keep their insertion order, and sorting twice changes nothing.
    pub fn sort(&mut self) {
        self.tasks.sort();
    }

    /// Distinct category names, sorted. Used to populate filter options.
    pub fn distinct_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.tasks.iter().map(|t| t.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Loads tasks from the default database path. See [`TaskStore::load_from`].
    pub fn load(&mut self) -> Result<()> {
        self.load_from(&db_path())
    }

    /// Replaces the store contents with the tasks persisted at `path`.
    ///
    /// A missing file is not an error; the store keeps its current contents
    /// (empty at startup). On a read or parse failure the previous contents
    /// are also kept, so a corrupt file never wipes the session.
    pub fn load_from(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no task database yet");
            return Ok(());
        }
        let mut f = OpenOptions::new().read(true).open(path)?;
        let mut s = String::new();
        f.read_to_string(&mut s)?;
        let tasks: Vec<Task> = serde_json::from_str(&s).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "task database unreadable");
            e
        })?;
        tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
        self.tasks = tasks;
        Ok(())
    }

    /// Saves to the default database path. See [`TaskStore::save_to`].
    pub fn save(&self) -> Result<()> {
        self.save_to(&db_path())
    }

    /// Writes the whole collection to `path`, overwriting the existing file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(&self.tasks)?;
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        f.write_all(s.as_bytes())?;
        tracing::debug!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }
}
