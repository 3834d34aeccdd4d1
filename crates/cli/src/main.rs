//! Terminal front-end for SmartTask
//!
//! Each invocation loads the task file, performs one action through the
//! [`TaskManager`], prints the result and exits.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use smarttask_core::app::{TaskManager, View};
use smarttask_core::task::{CategoryFilter, FileTaskStore, Task, TaskDraft, TaskPriority};
use smarttask_core::Config;

#[derive(Debug, Parser)]
#[command(name = "smarttask", version, about = "Keep a small list of dated tasks")]
struct Cli {
    /// Directory holding the task file (overrides SMARTTASK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tasks, optionally only one category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show every field of a task
    Show { task: String },
    /// Add a new task
    Add(NewTask),
    /// Change a task; omitted fields keep their current value
    Edit {
        task: String,
        #[command(flatten)]
        fields: TaskEdit,
    },
    /// Mark a task as completed
    Done { task: String },
    /// Delete a task
    Delete { task: String },
    /// List the categories in use
    Categories,
}

#[derive(Debug, Args)]
struct NewTask {
    #[arg(long)]
    name: String,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    due: String,
    /// Low, Medium or High
    #[arg(long, default_value = "Medium")]
    priority: String,
    #[arg(long)]
    category: Option<String>,
}

#[derive(Debug, Args)]
struct TaskEdit {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    due: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    category: Option<String>,
}

impl NewTask {
    fn into_draft(self) -> anyhow::Result<TaskDraft> {
        let priority: TaskPriority = self.priority.parse()?;
        Ok(TaskDraft {
            name: self.name,
            due_date: self.due,
            priority,
            category: self.category,
        })
    }
}

impl TaskEdit {
    fn apply(self, mut draft: TaskDraft) -> anyhow::Result<TaskDraft> {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(due) = self.due {
            draft.due_date = due;
        }
        if let Some(priority) = self.priority {
            draft.priority = priority.parse()?;
        }
        if let Some(category) = self.category {
            draft.category = Some(category);
        }
        Ok(draft)
    }
}

/// Resolve a task reference: a 1-based list position or a unique id prefix.
fn resolve_task(tasks: &[Task], reference: &str) -> anyhow::Result<Uuid> {
    let reference = reference.trim();
    if let Ok(position) = reference.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| tasks.get(index))
            .map(|task| task.id)
            .ok_or_else(|| anyhow!("No task at position {}", position));
    }

    let needle = reference.to_ascii_lowercase();
    let mut matches = tasks
        .iter()
        .filter(|task| task.id.to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task.id),
        (Some(_), Some(_)) => bail!("Task id prefix '{}' is ambiguous", reference),
        (None, _) => bail!("No task matches '{}'", reference),
    }
}

fn print_list(view: &View) {
    println!("Filter: {}", view.filter);
    if view.rows.is_empty() {
        println!("  (no tasks)");
    }
    for row in &view.rows {
        println!("{:>3}. {}", row.position, row.label);
    }
}

/// Print the manager's status and convert the action result for `main`
fn report<T>(
    manager: &TaskManager<FileTaskStore>,
    result: smarttask_core::Result<T>,
) -> anyhow::Result<T> {
    let status = manager
        .state()
        .status
        .as_ref()
        .map(|status| status.text.clone())
        .unwrap_or_default();
    match result {
        Ok(value) => {
            if !status.is_empty() {
                println!("{}", status);
            }
            Ok(value)
        }
        Err(_) => Err(anyhow!(status)),
    }
}

fn select(manager: &mut TaskManager<FileTaskStore>, reference: &str) -> anyhow::Result<()> {
    let id = resolve_task(manager.tasks(), reference)?;
    let result = manager.select(id).map(|_| ());
    report(manager, result)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    tracing::debug!("Using task file: {:?}", config.store_path());

    let mut manager = TaskManager::open(&config);
    if let Some(status) = manager.state().status.as_ref() {
        eprintln!("warning: {}", status.text);
    }

    match cli.command {
        Command::List { category } => {
            manager.set_filter(CategoryFilter::from_selection(category.as_deref()));
            print_list(&manager.view());
        }
        Command::Show { task } => {
            select(&mut manager, &task)?;
            let details = manager
                .view()
                .details
                .context("Selected task is not visible")?;
            println!("{}", details);
        }
        Command::Add(fields) => {
            let draft = fields.into_draft()?;
            let result = manager.submit(&draft);
            report(&manager, result)?;
        }
        Command::Edit { task, fields } => {
            select(&mut manager, &task)?;
            let current = manager.view().form.context("Selected task disappeared")?;
            let draft = fields.apply(current)?;
            let result = manager.submit(&draft);
            report(&manager, result)?;
        }
        Command::Done { task } => {
            select(&mut manager, &task)?;
            let result = manager.mark_selected_done();
            report(&manager, result)?;
        }
        Command::Delete { task } => {
            select(&mut manager, &task)?;
            let result = manager.delete_selected();
            report(&manager, result)?;
        }
        Command::Categories => {
            for category in manager.view().category_options {
                println!("{}", category);
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smarttask=warn,smarttask_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;

    fn tasks() -> Vec<Task> {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        vec![
            Task::new("A", date, TaskPriority::Low, "Work"),
            Task::new("B", date, TaskPriority::High, "Home"),
        ]
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_by_position() {
        let tasks = tasks();
        assert_eq!(resolve_task(&tasks, "1").unwrap(), tasks[0].id);
        assert_eq!(resolve_task(&tasks, " 2 ").unwrap(), tasks[1].id);
        assert!(resolve_task(&tasks, "0").is_err());
        assert!(resolve_task(&tasks, "3").is_err());
    }

    #[test]
    fn test_resolve_by_id() {
        let tasks = tasks();
        let full = tasks[1].id.to_string();
        assert_eq!(resolve_task(&tasks, &full).unwrap(), tasks[1].id);
        assert_eq!(
            resolve_task(&tasks, &full.to_ascii_uppercase()).unwrap(),
            tasks[1].id
        );
        assert!(resolve_task(&tasks, "not-an-id").is_err());
    }

    #[test]
    fn test_edit_keeps_omitted_fields() {
        let tasks = tasks();
        let edit = TaskEdit {
            name: None,
            due: Some("2024-02-01".to_string()),
            priority: Some("high".to_string()),
            category: None,
        };

        let draft = edit.apply(TaskDraft::from_task(&tasks[0])).unwrap();
        assert_eq!(draft.name, "A");
        assert_eq!(draft.due_date, "2024-02-01");
        assert_eq!(draft.priority, TaskPriority::High);
        assert_eq!(draft.category.as_deref(), Some("Work"));
    }

    #[test]
    fn test_new_task_rejects_bad_priority() {
        let fields = NewTask {
            name: "A".to_string(),
            due: "2024-01-15".to_string(),
            priority: "urgent".to_string(),
            category: None,
        };
        assert!(fields.into_draft().is_err());
    }

    #[test]
    fn test_add_then_list_through_manager() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = Config::default().with_data_dir(temp_dir.path());
        let mut manager = TaskManager::open(&config);

        let draft = Cli::try_parse_from([
            "smarttask",
            "add",
            "--name",
            "Water plants",
            "--due",
            "2024-05-05",
            "--category",
            "Home",
        ])
        .map(|cli| match cli.command {
            Command::Add(fields) => fields.into_draft().unwrap(),
            other => panic!("unexpected command {:?}", other),
        })
        .unwrap();

        let result = manager.submit(&draft);
        assert!(report(&manager, result).is_ok());
        assert_eq!(manager.tasks().len(), 1);
        assert_eq!(manager.view().rows[0].position, 1);
        assert_eq!(manager.tasks()[0].category, "Home");
    }
}
