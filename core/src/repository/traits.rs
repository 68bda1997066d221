use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::Result;
use crate::model::category::Category;
use crate::model::filter::{due_status, DueStatus};
use crate::model::task::{Priority, Task};

/// The record store for tasks. `list` returns newest-created first.
///
/// The filtered queries are the store-side query surface; the default
/// bodies post-filter `list`, and a backend with a real query engine can
/// override them.
pub trait TaskRepository {
    fn create(&self, task: Task) -> Result<Task>;
    fn list(&self) -> Result<Vec<Task>>;
    fn get(&self, id: &Uuid) -> Result<Task>;
    fn update(&self, task: &Task) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;

    fn by_category(&self, id: &Uuid) -> Result<Vec<Task>> {
        let mut tasks = self.list()?;
        tasks.retain(|t| t.category_id == *id);
        Ok(tasks)
    }

    fn by_priority(&self, priority: Priority) -> Result<Vec<Task>> {
        let mut tasks = self.list()?;
        tasks.retain(|t| t.priority == priority);
        Ok(tasks)
    }

    /// Incomplete tasks due today or later, soonest first.
    fn upcoming(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let mut tasks = self.list()?;
        tasks.retain(|t| {
            matches!(
                due_status(t, today),
                Some(DueStatus::Today) | Some(DueStatus::Upcoming)
            )
        });
        tasks.sort_by_key(|t| t.due_date);
        Ok(tasks)
    }

    /// Incomplete tasks due strictly before today, soonest first.
    fn overdue(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let mut tasks = self.list()?;
        tasks.retain(|t| due_status(t, today) == Some(DueStatus::Overdue));
        tasks.sort_by_key(|t| t.due_date);
        Ok(tasks)
    }

    fn search(&self, query: &str) -> Result<Vec<Task>> {
        let mut tasks = self.list()?;
        tasks.retain(|t| t.text_matches(query));
        Ok(tasks)
    }
}

pub trait CategoryRepository {
    fn create(&self, category: Category) -> Result<Category>;
    fn list(&self) -> Result<Vec<Category>>;
    fn get(&self, id: &Uuid) -> Result<Category>;
    fn update(&self, category: &Category) -> Result<()>;
    fn delete(&self, id: &Uuid) -> Result<()>;
}
