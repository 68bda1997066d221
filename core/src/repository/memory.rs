use std::sync::{Mutex, MutexGuard, PoisonError};

use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::category::Category;
use crate::model::task::Task;
use crate::repository::traits::{CategoryRepository, TaskRepository};

/// In-memory task store. The mock-store variant, and the test double.
#[derive(Default)]
pub struct MemTaskRepository {
    tasks: Mutex<Vec<Task>>,
}

impl MemTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskRepository for MemTaskRepository {
    fn create(&self, task: Task) -> Result<Task> {
        self.guard().push(task.clone());
        Ok(task)
    }

    fn list(&self) -> Result<Vec<Task>> {
        let mut tasks = self.guard().clone();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    fn get(&self, id: &Uuid) -> Result<Task> {
        self.guard()
            .iter()
            .find(|t| t.id == *id)
            .cloned()
            .ok_or(StoreError::not_found("task", *id))
    }

    fn update(&self, task: &Task) -> Result<()> {
        let mut tasks = self.guard();
        match tasks.iter().position(|t| t.id == task.id) {
            Some(pos) => {
                tasks[pos] = task.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("task", task.id)),
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut tasks = self.guard();
        let initial_len = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == initial_len {
            return Err(StoreError::not_found("task", *id));
        }
        Ok(())
    }
}

/// In-memory category store, pre-seeded with the default set.
pub struct MemCategoryRepository {
    categories: Mutex<Vec<Category>>,
}

impl Default for MemCategoryRepository {
    fn default() -> Self {
        Self::with_categories(crate::model::category::default_categories())
    }
}

impl MemCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
        }
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Category>> {
        self.categories
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl CategoryRepository for MemCategoryRepository {
    fn create(&self, category: Category) -> Result<Category> {
        self.guard().push(category.clone());
        Ok(category)
    }

    fn list(&self) -> Result<Vec<Category>> {
        Ok(self.guard().clone())
    }

    fn get(&self, id: &Uuid) -> Result<Category> {
        self.guard()
            .iter()
            .find(|c| c.id == *id)
            .cloned()
            .ok_or(StoreError::not_found("category", *id))
    }

    fn update(&self, category: &Category) -> Result<()> {
        let mut categories = self.guard();
        match categories.iter().position(|c| c.id == category.id) {
            Some(pos) => {
                categories[pos] = category.clone();
                Ok(())
            }
            None => Err(StoreError::not_found("category", category.id)),
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut categories = self.guard();
        let initial_len = categories.len();
        categories.retain(|c| c.id != *id);
        if categories.len() == initial_len {
            return Err(StoreError::not_found("category", *id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_returns_newest_first() {
        let repo = MemTaskRepository::new();
        let first = Task::new("first".to_string(), Uuid::new_v4());
        let mut second = Task::new("second".to_string(), Uuid::new_v4());
        second.created_at = first.created_at + chrono::Duration::seconds(1);

        repo.create(first.clone()).unwrap();
        repo.create(second.clone()).unwrap();

        let listed = repo.list().unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn delete_removes_from_subsequent_lists() {
        let repo = MemTaskRepository::new();
        let task = repo
            .create(Task::new("gone soon".to_string(), Uuid::new_v4()))
            .unwrap();

        repo.delete(&task.id).unwrap();
        assert!(repo.list().unwrap().is_empty());
        assert!(matches!(
            repo.get(&task.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let repo = MemTaskRepository::new();
        let ghost = Task::new("ghost".to_string(), Uuid::new_v4());

        assert!(matches!(
            repo.update(&ghost),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            repo.delete(&ghost.id),
            Err(StoreError::NotFound { .. })
        ));
    }
}
