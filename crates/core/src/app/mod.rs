//! Application state for task list front-ends
//!
//! A front-end holds a [`TaskManager`], forwards user actions to it, and
//! draws whatever [`render`] produces after each action.

mod manager;
mod view;

pub use manager::TaskManager;
pub use view::*;
