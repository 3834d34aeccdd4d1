//! Task module
//!
//! This module contains the task record, its validation and storage.

mod file_store;
mod filter;
mod model;
mod repository;
mod validation;

pub use file_store::{FileTaskStore, LoadOutcome};
pub use filter::{distinct_categories, filter_choices, CategoryFilter, ALL_CATEGORIES};
pub use model::*;
pub use repository::TaskRepository;
pub use validation::{ValidTask, ValidationError, ValidationErrors, DUE_DATE_FORMAT};
