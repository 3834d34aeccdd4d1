//! Core library for SmartTask
//!
//! This crate contains the task list business logic, including:
//! - The task record and its form validation
//! - A JSON file backed task store
//! - Presentation-facing application state

pub mod app;
pub mod config;
pub mod error;
pub mod task;

pub use config::Config;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
