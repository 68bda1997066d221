use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::category::{default_categories, Category};
use crate::model::task::Task;
use crate::repository::traits::{CategoryRepository, TaskRepository};

const TASKS_FILE_NAME: &str = "tasks.json";
const CATEGORIES_FILE_NAME: &str = "categories.json";
const DEFAULT_DIR_NAME: &str = ".taskdeck";

/// Resolves the data directory, creating it if needed. `None` means the
/// default location under the home directory.
fn data_dir(base_dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match base_dir {
        Some(dir) => dir,
        None => dirs::home_dir()
            .ok_or_else(|| StoreError::rejected("could not determine home directory"))?
            .join(DEFAULT_DIR_NAME),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn init_file<T: serde::Serialize>(path: &Path, initial: &[T]) -> Result<()> {
    if !path.exists() {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, initial)?;
        writer.flush()?;
    }
    Ok(())
}

/// Task store backed by a pretty-printed JSON array on disk.
///
/// Every operation reads and rewrites the whole file; the store is the
/// single source of truth and the volumes involved never justify more.
#[derive(Clone)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(TASKS_FILE_NAME);
        init_file::<Task>(&path, &[])?;
        Ok(FileTaskRepository { file_path: path })
    }

    fn read_tasks(&self) -> Result<Vec<Task>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let tasks: Vec<Task> = serde_json::from_reader(reader)?;
        debug!(count = tasks.len(), path = %self.file_path.display(), "loaded tasks");
        Ok(tasks)
    }

    fn write_tasks(&self, tasks: &[Task]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, tasks)?;
        writer.flush()?;
        debug!(count = tasks.len(), path = %self.file_path.display(), "wrote tasks");
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        let mut tasks = self.read_tasks()?;
        tasks.push(task.clone());
        self.write_tasks(&tasks)?;
        Ok(task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        let mut tasks = self.read_tasks()?;
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    fn get(&self, id: &Uuid) -> Result<Task> {
        self.read_tasks()?
            .into_iter()
            .find(|t| t.id == *id)
            .ok_or(StoreError::not_found("task", *id))
    }

    fn update(&self, task: &Task) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        match tasks.iter().position(|t| t.id == task.id) {
            Some(pos) => {
                tasks[pos] = task.clone();
                self.write_tasks(&tasks)
            }
            None => Err(StoreError::not_found("task", task.id)),
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        let initial_len = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == initial_len {
            return Err(StoreError::not_found("task", *id));
        }
        self.write_tasks(&tasks)
    }
}

/// Category store backed by a JSON array, seeded with the default set the
/// first time the file is created.
#[derive(Clone)]
pub struct FileCategoryRepository {
    file_path: PathBuf,
}

impl FileCategoryRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = data_dir(base_dir)?.join(CATEGORIES_FILE_NAME);
        if !path.exists() {
            debug!(path = %path.display(), "seeding default categories");
            init_file(&path, &default_categories())?;
        }
        Ok(FileCategoryRepository { file_path: path })
    }

    fn read_categories(&self) -> Result<Vec<Category>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    fn write_categories(&self, categories: &[Category]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, categories)?;
        writer.flush()?;
        Ok(())
    }
}

impl CategoryRepository for FileCategoryRepository {
    fn create(&self, category: Category) -> Result<Category> {
        let mut categories = self.read_categories()?;
        categories.push(category.clone());
        self.write_categories(&categories)?;
        Ok(category)
    }

    fn list(&self) -> Result<Vec<Category>> {
        self.read_categories()
    }

    fn get(&self, id: &Uuid) -> Result<Category> {
        self.read_categories()?
            .into_iter()
            .find(|c| c.id == *id)
            .ok_or(StoreError::not_found("category", *id))
    }

    fn update(&self, category: &Category) -> Result<()> {
        let mut categories = self.read_categories()?;
        match categories.iter().position(|c| c.id == category.id) {
            Some(pos) => {
                categories[pos] = category.clone();
                self.write_categories(&categories)
            }
            None => Err(StoreError::not_found("category", category.id)),
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut categories = self.read_categories()?;
        let initial_len = categories.len();
        categories.retain(|c| c.id != *id);
        if categories.len() == initial_len {
            return Err(StoreError::not_found("category", *id));
        }
        self.write_categories(&categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let task = {
            let repo = FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap();
            repo.create(Task::new("persisted".to_string(), Uuid::new_v4()))
                .unwrap()
        };

        let reopened = FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let listed = reopened.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, task.id);
        assert_eq!(listed[0].title, "persisted");
    }

    #[test]
    fn first_run_seeds_default_categories() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileCategoryRepository::new(Some(dir.path().to_path_buf())).unwrap();

        let categories = repo.list().unwrap();
        assert!(!categories.is_empty());
        assert!(categories.iter().any(|c| c.name == "Work"));

        // Reopening must not re-seed over user edits.
        repo.delete(&categories[0].id).unwrap();
        let reopened = FileCategoryRepository::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reopened.list().unwrap().len(), categories.len() - 1);
    }

    #[test]
    fn update_unknown_task_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileTaskRepository::new(Some(dir.path().to_path_buf())).unwrap();
        let ghost = Task::new("ghost".to_string(), Uuid::new_v4());

        assert!(matches!(
            repo.update(&ghost),
            Err(StoreError::NotFound { .. })
        ));
    }
}
