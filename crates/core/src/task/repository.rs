//! Task repository trait
//!
//! Defines the interface for task storage operations.

use uuid::Uuid;

use super::filter::{distinct_categories, filter_choices, CategoryFilter};
use super::model::Task;
use super::validation::ValidTask;
use crate::Result;

/// Repository interface for the ordered task list
pub trait TaskRepository {
    /// Append a task at the end of the list
    fn add(&mut self, task: Task) -> Result<Task>;

    /// Remove a task by ID, returning whether it was present
    fn remove(&mut self, id: Uuid) -> Result<bool>;

    /// Replace a task in place, keeping its identity and completion
    fn update(&mut self, id: Uuid, replacement: ValidTask) -> Result<Task>;

    /// Mark a task as completed
    fn mark_done(&mut self, id: Uuid) -> Result<Task>;

    /// Get a task by ID
    fn get(&self, id: Uuid) -> Option<&Task>;

    /// All tasks in list order
    fn list_all(&self) -> &[Task];

    fn len(&self) -> usize {
        self.list_all().len()
    }

    fn is_empty(&self) -> bool {
        self.list_all().is_empty()
    }

    /// Distinct categories in first-seen order
    fn categories(&self) -> Vec<String> {
        distinct_categories(self.list_all())
    }

    /// Categories for a filter selector, led by the "All Categories" sentinel
    fn list_categories(&self) -> Vec<String> {
        filter_choices(self.list_all())
    }

    /// Tasks matching the filter, in list order
    fn filter(&self, filter: &CategoryFilter) -> Vec<&Task> {
        self.list_all()
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }
}
