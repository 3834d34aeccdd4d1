//! File-based task storage implementation
//!
//! Stores the whole task list as a JSON array in a single file. Every
//! mutation rewrites the file through a temporary sibling and a rename, so
//! a crash mid-write leaves the previous contents intact.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::model::Task;
use super::repository::TaskRepository;
use super::validation::ValidTask;
use crate::{Error, Result};

/// What happened when the store read its file at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No file yet; it will be created on first write
    Fresh,
    /// The file was read successfully
    Loaded { count: usize },
    /// The file could not be read or parsed; the store started empty
    Recovered { reason: String },
}

/// File-based task store using JSON
#[derive(Debug)]
pub struct FileTaskStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Tasks in list order
    tasks: Vec<Task>,
    load_outcome: LoadOutcome,
}

impl FileTaskStore {
    /// Open the store at `path`, loading whatever is there.
    ///
    /// Never fails: an unreadable or corrupt file yields an empty store and
    /// a [`LoadOutcome::Recovered`] describing the problem.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tasks, load_outcome) = match Self::load(&path) {
            Ok(Some(tasks)) => {
                info!("Loaded {} tasks from {}", tasks.len(), path.display());
                let count = tasks.len();
                (tasks, LoadOutcome::Loaded { count })
            }
            Ok(None) => {
                debug!("No task file at {}, starting empty", path.display());
                (Vec::new(), LoadOutcome::Fresh)
            }
            Err(e) => {
                warn!(
                    "Failed to load tasks from {}, starting empty: {}",
                    path.display(),
                    e
                );
                (
                    Vec::new(),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    },
                )
            }
        };

        Self {
            path,
            tasks,
            load_outcome,
        }
    }

    fn load(path: &Path) -> Result<Option<Vec<Task>>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Storage(format!("Failed to read tasks file: {}", e)))?;
        let tasks = serde_json::from_str(&content)
            .map_err(|e| Error::Storage(format!("Failed to parse tasks file: {}", e)))?;
        Ok(Some(tasks))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write the whole list to disk
    fn persist(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.tasks)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;

        debug!("Saved {} tasks to {}", self.tasks.len(), self.path.display());
        Ok(())
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn persist_logged(&self, action: &str) -> Result<()> {
        self.persist().map_err(|e| {
            warn!("Failed to persist tasks after {}: {}", action, e);
            e
        })
    }
}

impl TaskRepository for FileTaskStore {
    fn add(&mut self, task: Task) -> Result<Task> {
        self.tasks.push(task.clone());
        self.persist_logged("add")?;
        Ok(task)
    }

    fn remove(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.position(id) else {
            warn!("Remove ignored, task {} is not in the list", id);
            return Ok(false);
        };
        self.tasks.remove(index);
        self.persist_logged("remove")?;
        Ok(true)
    }

    fn update(&mut self, id: Uuid, replacement: ValidTask) -> Result<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let ValidTask {
            name,
            due_date,
            priority,
            category,
        } = replacement;
        let task = self.tasks[index].replaced_with(name, due_date, priority, category);
        self.tasks[index] = task.clone();
        self.persist_logged("update")?;
        Ok(task)
    }

    fn mark_done(&mut self, id: Uuid) -> Result<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        self.tasks[index].mark_complete();
        let task = self.tasks[index].clone();
        self.persist_logged("mark done")?;
        Ok(task)
    }

    fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn list_all(&self) -> &[Task] {
        &self.tasks
    }
}
