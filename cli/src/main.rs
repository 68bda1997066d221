mod render;
mod tui;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use taskdeck_core::{
    parse_args, resolve_category, to_new_task, to_patch, Board, CategoryPatch, CategoryRepository,
    CategoryService, Filter, FileCategoryRepository, FileTaskRepository, MemCategoryRepository,
    MemTaskRepository, Task, TaskPatch, TaskRepository, TaskService,
};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Track tasks by category, priority and due date", long_about = None)]
struct Cli {
    /// Data directory (defaults to ~/.taskdeck)
    #[arg(long, global = true, env = "TASKDECK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Run against a throwaway in-memory store
    #[arg(long, global = true)]
    mem: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add a task (usage: add Pay rent due:tomorrow cat:Home pri:high)
    Add {
        /// Title plus key:value metadata (due, category, priority, description)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks for a view: all, today, upcoming, overdue, completed,
    /// priority-high, a category name, or free text to search
    List {
        key: Option<String>,
    },
    /// Mark a task completed
    Done { id: String },
    /// Reopen a completed task
    Reopen { id: String },
    /// Edit a task: free text replaces the title, key:value tokens patch fields
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Rm { id: String },
    /// Manage categories
    Cat {
        #[command(subcommand)]
        command: CatCommands,
    },
    /// Open the full-screen interface
    Tui,
}

#[derive(clap::Subcommand)]
enum CatCommands {
    List,
    Add {
        name: String,
        #[arg(long, default_value = "#6366F1")]
        color: String,
        #[arg(long, default_value = "Tag")]
        icon: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    Rm {
        id: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.mem {
        run(
            cli.command,
            TaskService::new(MemTaskRepository::new()),
            CategoryService::new(MemCategoryRepository::new()),
        )
    } else {
        let tasks = TaskService::new(FileTaskRepository::new(cli.data_dir.clone())?);
        let categories = CategoryService::new(FileCategoryRepository::new(cli.data_dir)?);
        run(cli.command, tasks, categories)
    }
}

fn run<T: TaskRepository, C: CategoryRepository>(
    command: Option<Commands>,
    tasks: TaskService<T>,
    categories: CategoryService<C>,
) -> Result<()> {
    match command {
        Some(Commands::Add { args }) => {
            let parsed = parse_args(&args);
            let payload = to_new_task(&parsed, &categories.list()?)?;
            let created = tasks.create_task(payload)?;
            println!("Task added: {} (ID: {})", created.title, &created.id.to_string()[..8]);
            if let Some(due) = created.due_date {
                println!("  Due: {due}");
            }
            println!("  Priority: {}", created.priority.key());
        }
        Some(Commands::List { key }) => {
            let cats = categories.list()?;
            let filter = match key {
                Some(key) => resolve_filter(&key, &cats),
                None => Filter::All,
            };
            let view = Board::new(&tasks, &categories).view(&filter, taskdeck_core::today())?;
            render::print_tasks(&view);
        }
        Some(Commands::Done { id }) => {
            let id = resolve_task_id(&tasks.all()?, &id)?;
            let patch = TaskPatch {
                completed: Some(true),
                ..Default::default()
            };
            let task = tasks.update(&id, &patch)?;
            println!("Completed: {}", task.title);
        }
        Some(Commands::Reopen { id }) => {
            let id = resolve_task_id(&tasks.all()?, &id)?;
            let patch = TaskPatch {
                completed: Some(false),
                ..Default::default()
            };
            let task = tasks.update(&id, &patch)?;
            println!("Reopened: {}", task.title);
        }
        Some(Commands::Edit { id, args }) => {
            let id = resolve_task_id(&tasks.all()?, &id)?;
            let parsed = parse_args(&args);
            let patch = to_patch(&parsed, &categories.list()?)?;
            let task = tasks.update(&id, &patch)?;
            println!("Updated: {}", task.title);
        }
        Some(Commands::Rm { id }) => {
            let id = resolve_task_id(&tasks.all()?, &id)?;
            tasks.delete(&id)?;
            println!("Task deleted.");
        }
        Some(Commands::Cat { command }) => run_cat(command, &categories)?,
        Some(Commands::Tui) | None => tui::run(tasks, categories)?,
    }
    Ok(())
}

fn run_cat<C: CategoryRepository>(
    command: CatCommands,
    categories: &CategoryService<C>,
) -> Result<()> {
    match command {
        CatCommands::List => render::print_categories(&categories.list()?),
        CatCommands::Add { name, color, icon } => {
            let created = categories.create_category(&name, &color, &icon)?;
            println!("Category added: {} (ID: {})", created.name, &created.id.to_string()[..8]);
        }
        CatCommands::Edit {
            id,
            name,
            color,
            icon,
        } => {
            let id = resolve_category(&id, &categories.list()?)?;
            let patch = CategoryPatch { name, color, icon };
            let updated = categories.update(&id, &patch)?;
            println!("Category updated: {}", updated.name);
        }
        CatCommands::Rm { id } => {
            let id = resolve_category(&id, &categories.list()?)?;
            categories.delete(&id)?;
            println!("Category deleted. Tasks keep their reference and show no category.");
        }
    }
    Ok(())
}

/// Turns a `list` argument into a filter. Bare category names work as a
/// convenience on top of the sidebar keys.
fn resolve_filter(key: &str, categories: &[taskdeck_core::Category]) -> Filter {
    let filter = Filter::from_key(key);
    if let Filter::Search(text) = &filter {
        if let Some(category) = categories.iter().find(|c| c.name.eq_ignore_ascii_case(text)) {
            return Filter::Category(category.id);
        }
    }
    filter
}

/// Resolves a unique task id prefix, mirroring the short ids the listings
/// print.
fn resolve_task_id(all: &[Task], prefix: &str) -> Result<Uuid> {
    let matches: Vec<&Task> = all
        .iter()
        .filter(|t| t.id.to_string().starts_with(prefix))
        .collect();
    match matches.len() {
        1 => Ok(matches[0].id),
        0 => bail!("no task matches id '{prefix}'"),
        n => bail!("id '{prefix}' is ambiguous ({n} matches)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_prefix_resolution() {
        let a = Task::new("a".to_string(), Uuid::new_v4());
        let b = Task::new("b".to_string(), Uuid::new_v4());
        let all = vec![a.clone(), b.clone()];

        let prefix = &a.id.to_string()[..8];
        assert_eq!(resolve_task_id(&all, prefix).unwrap(), a.id);
        assert!(resolve_task_id(&all, "zzzzzzzz").is_err());
        // Every id matches the empty prefix.
        assert!(resolve_task_id(&all, "").is_err());
    }

    #[test]
    fn bare_category_name_resolves_to_category_filter() {
        let categories = taskdeck_core::default_categories();
        let work = categories.iter().find(|c| c.name == "Work").unwrap();

        assert_eq!(
            resolve_filter("work", &categories),
            Filter::Category(work.id)
        );
        assert_eq!(resolve_filter("today", &categories), Filter::Today);
        assert_eq!(
            resolve_filter("laundry", &categories),
            Filter::Search("laundry".to_string())
        );
    }
}
