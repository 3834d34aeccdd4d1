//! Task manager
//!
//! Routes user actions to the repository and keeps the presentation state in
//! step with it. Failures become status messages; nothing here panics.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::view::{render, AppState, StatusMessage, View};
use crate::config::Config;
use crate::task::{CategoryFilter, FileTaskStore, LoadOutcome, Task, TaskDraft, TaskRepository};
use crate::{Error, Result};

pub struct TaskManager<R> {
    repo: R,
    state: AppState,
}

impl TaskManager<FileTaskStore> {
    /// Open the configured task file.
    ///
    /// A file that could not be loaded is reported through the status.
    pub fn open(config: &Config) -> Self {
        let store = FileTaskStore::open(config.store_path());
        let status = match store.load_outcome() {
            LoadOutcome::Recovered { reason } => Some(StatusMessage::error(format!(
                "Saved tasks could not be loaded: {}",
                reason
            ))),
            _ => None,
        };
        let mut manager = Self::new(store);
        manager.state.status = status;
        manager
    }
}

impl<R: TaskRepository> TaskManager<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        self.repo.list_all()
    }

    pub fn selected(&self) -> Option<&Task> {
        self.state.selected.and_then(|id| self.repo.get(id))
    }

    pub fn view(&self) -> View {
        render(self.repo.list_all(), &self.state)
    }

    pub fn select(&mut self, id: Uuid) -> Result<&Task> {
        if self.repo.get(id).is_none() {
            return Err(self.fail(Error::TaskNotFound(id.to_string())));
        }
        self.state.selected = Some(id);
        self.state.status = None;
        self.repo
            .get(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))
    }

    /// Drop the selection and return the form to "add" mode
    pub fn clear_selection(&mut self) {
        self.state.selected = None;
        self.state.status = None;
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.state.filter = filter;
        self.sync_filter();
    }

    pub fn show_all(&mut self) {
        self.state.filter = CategoryFilter::All;
    }

    /// Add a task, or update the selected one.
    pub fn submit(&mut self, draft: &TaskDraft) -> Result<Task> {
        let valid = match draft.validate() {
            Ok(valid) => valid,
            Err(issues) => return Err(self.fail(Error::Validation(issues))),
        };

        let (result, message) = match self.state.selected {
            None => (self.repo.add(valid.into_task()), "Task added successfully"),
            Some(id) => (self.repo.update(id, valid), "Task updated successfully"),
        };

        match result {
            Ok(task) => {
                info!("{}: {}", message, task.id);
                self.finish(message);
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Delete the selected task.
    pub fn delete_selected(&mut self) -> Result<Task> {
        let Some(task) = self.selected().cloned() else {
            return Err(self.fail(Error::InvalidInput(
                "Please select a task to delete".to_string(),
            )));
        };

        match self.repo.remove(task.id) {
            Ok(true) => {
                info!("Task deleted: {}", task.id);
                self.finish("Task deleted successfully");
                Ok(task)
            }
            Ok(false) => Err(self.fail(Error::TaskNotFound(task.id.to_string()))),
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Mark the selected task as completed.
    pub fn mark_selected_done(&mut self) -> Result<Task> {
        let Some(id) = self.selected().map(|task| task.id) else {
            return Err(self.fail(Error::InvalidInput(
                "Please select a task to mark as completed".to_string(),
            )));
        };

        match self.repo.mark_done(id) {
            Ok(task) => {
                info!("Task completed: {}", task.id);
                self.finish("Task marked as completed");
                Ok(task)
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    fn finish(&mut self, message: &str) {
        self.state.selected = None;
        self.sync_filter();
        self.state.status = Some(StatusMessage::info(message));
    }

    fn fail(&mut self, error: Error) -> Error {
        match &error {
            Error::Validation(_) | Error::InvalidInput(_) => debug!("Action rejected: {}", error),
            _ => warn!("Action failed: {}", error),
        }
        self.state.status = Some(StatusMessage::error(error_text(&error)));
        error
    }

    /// Fall back to all categories when the filtered one disappeared
    fn sync_filter(&mut self) {
        if let CategoryFilter::Only(category) = &self.state.filter {
            if !self.repo.categories().contains(category) {
                self.state.filter = CategoryFilter::All;
            }
        }
    }
}

fn error_text(error: &Error) -> String {
    match error {
        Error::Validation(issues) => issues.to_string(),
        Error::InvalidInput(message) => message.clone(),
        other => other.to_string(),
    }
}
