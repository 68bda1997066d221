use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::filter::Filter;
use crate::model::task::{NewTask, Task, TaskPatch};
use crate::repository::TaskRepository;

/// CRUD over the task store plus filter-aware listing. The store's
/// rejection is propagated untouched; callers turn it into a notice.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_task(&self, new_task: NewTask) -> Result<Task> {
        if new_task.title.trim().is_empty() {
            return Err(StoreError::validation("a task title is required"));
        }
        let mut task = Task::new(new_task.title.trim().to_string(), new_task.category_id);
        task.description = new_task.description;
        task.priority = new_task.priority;
        task.due_date = new_task.due_date;

        let created = self.repo.create(task)?;
        debug!(id = %created.id, "task created");
        Ok(created)
    }

    /// The complete set, for count aggregation.
    pub fn all(&self) -> Result<Vec<Task>> {
        self.repo.list()
    }

    /// Resolves the filter to a fetch strategy, then applies its predicate
    /// to whatever came back. The date-bucket views hit the store's
    /// filtered queries; the rest post-filter the full list.
    pub fn list(&self, filter: &Filter, today: NaiveDate) -> Result<Vec<Task>> {
        let mut tasks = match filter {
            Filter::Category(id) => self.repo.by_category(id)?,
            Filter::Priority(priority) => self.repo.by_priority(*priority)?,
            Filter::Upcoming => self.repo.upcoming(today)?,
            Filter::Overdue => self.repo.overdue(today)?,
            Filter::Search(query) => self.repo.search(query)?,
            Filter::All | Filter::Today | Filter::Completed => self.repo.list()?,
        };
        tasks.retain(|t| filter.matches(t, today));
        Ok(tasks)
    }

    pub fn get(&self, id: &Uuid) -> Result<Task> {
        self.repo.get(id)
    }

    pub fn update(&self, id: &Uuid, patch: &TaskPatch) -> Result<Task> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::validation("a task title is required"));
            }
        }
        let mut task = self.repo.get(id)?;
        patch.apply(&mut task);
        self.repo.update(&task)?;
        debug!(id = %task.id, "task updated");
        Ok(task)
    }

    pub fn delete(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id)?;
        debug!(%id, "task deleted");
        Ok(())
    }

    /// Flips completion, stamping or clearing `completed_at`.
    pub fn toggle_complete(&self, id: &Uuid) -> Result<Task> {
        let mut task = self.repo.get(id)?;
        task.set_completed(!task.completed);
        self.repo.update(&task)?;
        Ok(task)
    }
}
