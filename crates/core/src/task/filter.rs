//! Category filtering

use super::model::Task;

/// Sentinel shown at the top of the category list, meaning no filter
pub const ALL_CATEGORIES: &str = "All Categories";

/// Restricts which tasks are shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// Map a combo box selection to a filter.
    ///
    /// No selection and the [`ALL_CATEGORIES`] sentinel both mean `All`.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            None => Self::All,
            Some(value) if value == ALL_CATEGORIES => Self::All,
            Some(value) => Self::Only(value.to_string()),
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => task.category == *category,
        }
    }

    /// The label to show for this filter in a selection list
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

/// Distinct non-empty categories in first-seen order
pub fn distinct_categories(tasks: &[Task]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for task in tasks {
        if !task.category.is_empty() && !categories.contains(&task.category) {
            categories.push(task.category.clone());
        }
    }
    categories
}

/// Choices for a filter selector, led by the [`ALL_CATEGORIES`] sentinel
pub fn filter_choices(tasks: &[Task]) -> Vec<String> {
    let mut choices = vec![ALL_CATEGORIES.to_string()];
    // The sentinel must stay unique even if a task uses it as a label.
    choices.extend(
        distinct_categories(tasks)
            .into_iter()
            .filter(|category| category != ALL_CATEGORIES),
    );
    choices
}
