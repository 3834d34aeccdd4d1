//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Category assigned to tasks created without one
pub const DEFAULT_CATEGORY: &str = "General";

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(Error::InvalidInput(format!(
                "Unknown priority '{}', expected Low, Medium or High",
                other
            ))),
        }
    }
}

/// Returns the category to store for user input, falling back to
/// [`DEFAULT_CATEGORY`] when the input is blank.
pub fn normalize_category(category: Option<&str>) -> String {
    category
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_CATEGORY)
        .to_string()
}

/// A task in the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task.
    ///
    /// A blank category is stored as [`DEFAULT_CATEGORY`]. No other
    /// validation happens here; see [`TaskDraft::validate`].
    pub fn new(
        name: impl Into<String>,
        due_date: NaiveDate,
        priority: TaskPriority,
        category: impl AsRef<str>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            due_date,
            priority,
            category: normalize_category(Some(category.as_ref())),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the task as completed. There is no way back to pending.
    pub fn mark_complete(&mut self) {
        if !self.completed {
            self.completed = true;
            self.updated_at = Utc::now();
        }
    }

    /// Build the replacement for this task from new field values.
    ///
    /// Identity, creation time and completion carry over.
    pub fn replaced_with(
        &self,
        name: String,
        due_date: NaiveDate,
        priority: TaskPriority,
        category: String,
    ) -> Self {
        Self {
            id: self.id,
            name,
            due_date,
            priority,
            category: normalize_category(Some(&category)),
            completed: self.completed,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }

    /// Multi-line rendering of every field, used by the details pane.
    pub fn describe(&self) -> String {
        format!(
            "Task: {}\nDue: {}\nPriority: {}\nCategory: {}\nStatus: {}",
            self.name,
            self.due_date.format("%Y-%m-%d"),
            self.priority,
            self.category,
            self.status_label()
        )
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.completed { "[✔]" } else { "[ ]" };
        write!(
            f,
            "{} {} (Due: {}, P: {}, C: {})",
            marker,
            self.name,
            self.due_date.format("%Y-%m-%d"),
            self.priority,
            self.category
        )
    }
}

/// Unvalidated task input, as typed into a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub due_date: String,
    pub priority: TaskPriority,
    pub category: Option<String>,
}

impl TaskDraft {
    pub fn new(name: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            due_date: due_date.into(),
            ..Default::default()
        }
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Prefill a draft from an existing task, for editing
    pub fn from_task(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            priority: task.priority,
            category: Some(task.category.clone()),
        }
    }
}
