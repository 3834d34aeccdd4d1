//! Form validation for task drafts

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use super::model::{normalize_category, Task, TaskDraft, TaskPriority};

/// The only accepted due date pattern
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single problem found in a draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task name cannot be empty")]
    EmptyName,

    #[error("Due date cannot be empty")]
    EmptyDueDate,

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDueDate(String),
}

/// Every problem found in a draft, in form order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// A draft that passed validation, trimmed and normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    pub name: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub category: String,
}

impl ValidTask {
    /// Turn into a brand new pending task
    pub fn into_task(self) -> Task {
        Task::new(self.name, self.due_date, self.priority, self.category)
    }
}

/// Parse a due date in strict `YYYY-MM-DD` form.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(input, DUE_DATE_FORMAT).ok()
}

impl TaskDraft {
    /// Check the draft and collect every problem found.
    pub fn validate(&self) -> Result<ValidTask, ValidationErrors> {
        let mut issues = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            issues.push(ValidationError::EmptyName);
        }

        let due = self.due_date.trim();
        let due_date = if due.is_empty() {
            issues.push(ValidationError::EmptyDueDate);
            None
        } else {
            let parsed = parse_due_date(due);
            if parsed.is_none() {
                issues.push(ValidationError::InvalidDueDate(due.to_string()));
            }
            parsed
        };

        match due_date {
            Some(due_date) if issues.is_empty() => Ok(ValidTask {
                name: name.to_string(),
                due_date,
                priority: self.priority,
                category: normalize_category(self.category.as_deref()),
            }),
            _ => Err(ValidationErrors(issues)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft() {
        let valid = TaskDraft::new("  Write report ", "2024-01-15")
            .with_priority(TaskPriority::High)
            .with_category(" Work ")
            .validate()
            .unwrap();

        assert_eq!(valid.name, "Write report");
        assert_eq!(valid.due_date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(valid.priority, TaskPriority::High);
        assert_eq!(valid.category, "Work");
    }

    #[test]
    fn test_missing_category_becomes_general() {
        let valid = TaskDraft::new("Chores", "2024-01-15").validate().unwrap();
        assert_eq!(valid.category, "General");

        let valid = TaskDraft::new("Chores", "2024-01-15")
            .with_category("")
            .validate()
            .unwrap();
        assert_eq!(valid.category, "General");
    }

    #[test]
    fn test_rejected_dates() {
        for input in ["2024-13-45", "15-01-2024", "2024-1-5", "2024/01/15", "2023-02-29"] {
            let errors = TaskDraft::new("Task", input).validate().unwrap_err();
            assert_eq!(
                errors.0,
                vec![ValidationError::InvalidDueDate(input.to_string())],
                "input {input}"
            );
        }
    }

    #[test]
    fn test_empty_date() {
        let errors = TaskDraft::new("Task", "   ").validate().unwrap_err();
        assert_eq!(errors.0, vec![ValidationError::EmptyDueDate]);
    }

    #[test]
    fn test_collects_every_issue() {
        let errors = TaskDraft::new(" ", "").validate().unwrap_err();
        assert_eq!(
            errors.0,
            vec![ValidationError::EmptyName, ValidationError::EmptyDueDate]
        );
        assert_eq!(
            errors.to_string(),
            "Task name cannot be empty\nDue date cannot be empty"
        );
    }

    #[test]
    fn test_leap_day() {
        assert!(parse_due_date("2024-02-29").is_some());
        assert!(parse_due_date("2023-02-29").is_none());
    }

    #[test]
    fn test_into_task_is_pending() {
        let task = TaskDraft::new("Chores", "2024-01-15")
            .validate()
            .unwrap()
            .into_task();
        assert!(!task.completed);
        assert_eq!(task.category, "General");
    }
}
