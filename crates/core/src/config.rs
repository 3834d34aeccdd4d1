//! Runtime configuration
//!
//! Resolves where the task file lives. Values come from the environment:
//! - `SMARTTASK_DATA_DIR`: directory holding the task file
//! - `SMARTTASK_FILE`: file name inside that directory

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SMARTTASK_DATA_DIR";
pub const FILE_NAME_ENV: &str = "SMARTTASK_FILE";

pub const DEFAULT_DATA_DIR: &str = ".smarttask-data";
pub const DEFAULT_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            data_dir: non_blank(lookup(DATA_DIR_ENV))
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            file_name: non_blank(lookup(FILE_NAME_ENV)).unwrap_or(defaults.file_name),
        }
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// Full path of the task file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(
            config.store_path(),
            PathBuf::from(".smarttask-data").join("tasks.json")
        );
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/tmp/tasks"),
            (FILE_NAME_ENV, "simple.json"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tasks"));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/tasks/simple.json"));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(lookup(&[(DATA_DIR_ENV, "  "), (FILE_NAME_ENV, "")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_with_data_dir() {
        let config = Config::default().with_data_dir("elsewhere");
        assert_eq!(config.store_path(), PathBuf::from("elsewhere/tasks.json"));
    }
}
