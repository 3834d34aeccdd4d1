//! Presentation state and its pure rendering

use serde::Serialize;
use uuid::Uuid;

use crate::task::{distinct_categories, filter_choices, CategoryFilter, Task, TaskDraft};

pub const ADD_LABEL: &str = "Add Task";
pub const UPDATE_LABEL: &str = "Update Task";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line feedback shown after an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }
}

/// Everything the presentation needs besides the task list itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub selected: Option<Uuid>,
    pub filter: CategoryFilter,
    pub status: Option<StatusMessage>,
}

/// A visible list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: Uuid,
    /// 1-based position in the unfiltered list
    pub position: usize,
    pub label: String,
    pub completed: bool,
    pub selected: bool,
}

/// A rendered snapshot of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub rows: Vec<TaskRow>,
    /// Details of the selected task, when it is visible
    pub details: Option<String>,
    /// Form contents for editing the selected task
    pub form: Option<TaskDraft>,
    pub filter: String,
    pub filter_options: Vec<String>,
    pub category_options: Vec<String>,
    pub submit_label: &'static str,
    pub status: Option<StatusMessage>,
}

/// Draw the application from the current task list and state.
pub fn render(tasks: &[Task], state: &AppState) -> View {
    let rows: Vec<TaskRow> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| state.filter.matches(task))
        .map(|(index, task)| TaskRow {
            id: task.id,
            position: index + 1,
            label: task.to_string(),
            completed: task.completed,
            selected: state.selected == Some(task.id),
        })
        .collect();

    let selected = state
        .selected
        .and_then(|id| tasks.iter().find(|task| task.id == id));
    let visible = selected.filter(|task| state.filter.matches(task));

    View {
        rows,
        details: visible.map(Task::describe),
        form: selected.map(TaskDraft::from_task),
        filter: state.filter.label().to_string(),
        filter_options: filter_choices(tasks),
        category_options: distinct_categories(tasks),
        submit_label: if selected.is_some() {
            UPDATE_LABEL
        } else {
            ADD_LABEL
        },
        status: state.status.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPriority;
    use chrono::NaiveDate;

    fn tasks() -> Vec<Task> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        vec![
            Task::new("A", date, TaskPriority::Low, "Work"),
            Task::new("B", date, TaskPriority::High, "Home"),
            Task::new("C", date, TaskPriority::Medium, "Work"),
        ]
    }

    #[test]
    fn test_render_empty() {
        let view = render(&[], &AppState::default());
        assert!(view.rows.is_empty());
        assert!(view.details.is_none());
        assert!(view.form.is_none());
        assert_eq!(view.filter, "All Categories");
        assert_eq!(view.filter_options, vec!["All Categories"]);
        assert!(view.category_options.is_empty());
        assert_eq!(view.submit_label, ADD_LABEL);
    }

    #[test]
    fn test_render_filtered_rows_keep_positions() {
        let tasks = tasks();
        let state = AppState {
            filter: CategoryFilter::Only("Work".into()),
            ..Default::default()
        };

        let view = render(&tasks, &state);
        let positions: Vec<usize> = view.rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 3]);
        assert_eq!(view.rows[0].label, "[ ] A (Due: 2024-01-15, P: Low, C: Work)");
        assert_eq!(view.filter, "Work");
        assert_eq!(view.filter_options, vec!["All Categories", "Work", "Home"]);
        assert_eq!(view.category_options, vec!["Work", "Home"]);
    }

    #[test]
    fn test_render_selection() {
        let tasks = tasks();
        let state = AppState {
            selected: Some(tasks[1].id),
            ..Default::default()
        };

        let view = render(&tasks, &state);
        assert!(view.rows[1].selected);
        assert!(!view.rows[0].selected);
        assert_eq!(view.details.as_deref(), Some(tasks[1].describe().as_str()));
        assert_eq!(view.form.as_ref().map(|f| f.name.as_str()), Some("B"));
        assert_eq!(view.submit_label, UPDATE_LABEL);
    }

    #[test]
    fn test_render_hides_details_of_filtered_out_selection() {
        let tasks = tasks();
        let state = AppState {
            selected: Some(tasks[1].id),
            filter: CategoryFilter::Only("Work".into()),
            status: None,
        };

        let view = render(&tasks, &state);
        assert!(view.details.is_none());
        assert!(view.rows.iter().all(|row| !row.selected));
    }
}
