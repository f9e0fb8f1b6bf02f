use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Display/input format for due dates (minute precision).
pub const DUE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Task priority. Serialized and displayed as the upper-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    /// Parses a priority name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            other => Err(Error::validation(format!(
                "unknown priority '{}' (expected HIGH, MEDIUM or LOW)",
                other
            ))),
        }
    }
}

// Priorities sort by name, not severity: HIGH < LOW < MEDIUM. This matches the
// rest of the task ordering (category, description) and is deliberate.
impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A display color stored as plain RGBA channels so it survives serialization
/// no matter what color type the active presentation layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for CategoryColor {
    /// Neutral gray.
    fn default() -> Self {
        CategoryColor {
            r: 200,
            g: 200,
            b: 200,
            a: 255,
        }
    }
}

/// Represents a single task in the task manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// What needs doing. Trimmed, never empty.
    pub description: String,
    pub priority: Priority,
    /// Free-form category, normalized to `Capitalized` form.
    pub category: String,
    /// Optional due date, minute precision.
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed: bool,
    /// Free-form notes, trimmed on write.
    #[serde(default)]
    pub notes: String,
    /// Timestamp when the task was created (RFC 3339), fixed at construction.
    pub created_at: String,
    /// Display color for the category; not part of identity or ordering.
    #[serde(default)]
    pub category_color: CategoryColor,
}

/// First letter upper-case, remainder lower-case. Safe on single-character
/// and non-ASCII input.
fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

impl Task {
    /// Creates a new incomplete task.
    ///
    /// Rejects a description or category that is empty after trimming; callers
    /// never see a partially constructed task.
    pub fn new(description: &str, priority: Priority, category: &str) -> Result<Task> {
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(Error::validation("task description must not be empty"));
        }
        let category = normalize_category(category);
        if category.is_empty() {
            return Err(Error::validation("task category must not be empty"));
        }
        Ok(Task {
            description,
            priority,
            category,
            due_date: None,
            completed: false,
            notes: String::new(),
            created_at: Local::now().to_rfc3339(),
            category_color: CategoryColor::default(),
        })
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::validation("task description must not be empty"));
        }
        self.description = description.to_string();
        Ok(())
    }

    /// Replaces the category, re-applying normalization.
    pub fn set_category(&mut self, category: &str) -> Result<()> {
        let category = normalize_category(category);
        if category.is_empty() {
            return Err(Error::validation("task category must not be empty"));
        }
        self.category = category;
        Ok(())
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.trim().to_string();
    }
}

// Identity is (description, priority, category) only. Two tasks with the same
// text, priority and category are the same task even when notes, due date or
// completion differ. Ordering below looks at a different field set; a == b
// does not imply cmp == Equal, and that gap is intentional.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.description == other.description
            && self.priority == other.priority
            && self.category == other.category
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.description.hash(state);
        self.priority.hash(state);
        self.category.hash(state);
    }
}

impl Ord for Task {
    /// Display order: incomplete first, then earlier due date when both sides
    /// have one, then priority name, category, description.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.completed != other.completed {
            return if self.completed {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        // A task without a due date is not ordered against one with a due
        // date; the date comparison only applies when both are present.
        if let (Some(a), Some(b)) = (self.due_date, other.due_date) {
            let by_date = a.cmp(&b);
            if by_date != Ordering::Equal {
                return by_date;
            }
        }
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.category.cmp(&other.category))
            .then_with(|| self.description.cmp(&other.description))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Task {
    /// One-line summary: `✓ [HIGH] description (Category) Due: 2025-12-01 09:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.completed {
            write!(f, "✓ ")?;
        }
        write!(f, "[{}] {} ({})", self.priority, self.description, self.category)?;
        if let Some(due) = self.due_date {
            write!(f, " Due: {}", due.format(DUE_FORMAT))?;
        }
        Ok(())
    }
}
