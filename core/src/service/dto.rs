use chrono::NaiveDate;

use crate::model::category::Category;
use crate::model::filter::{due_status, DueStatus};
use crate::model::task::Task;

/// A task shaped for rendering: the record plus its resolved category and
/// day-granularity due classification.
///
/// `category` is `None` when the reference dangles (the category was
/// deleted); views render that as "no category" rather than failing.
#[derive(Debug, Clone)]
pub struct TaskDto {
    pub task: Task,
    pub category: Option<Category>,
    pub due_status: Option<DueStatus>,
}

impl TaskDto {
    pub fn from_entity(task: Task, categories: &[Category], today: NaiveDate) -> Self {
        let category = categories.iter().find(|c| c.id == task.category_id).cloned();
        let due_status = due_status(&task, today);
        Self {
            task,
            category,
            due_status,
        }
    }

    pub fn category_name(&self) -> &str {
        self.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::default_categories;
    use uuid::Uuid;

    #[test]
    fn dangling_category_reference_is_tolerated() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let task = Task::new("orphan".to_string(), Uuid::new_v4());

        let dto = TaskDto::from_entity(task, &default_categories(), today);
        assert!(dto.category.is_none());
        assert_eq!(dto.category_name(), "-");
    }

    #[test]
    fn resolves_category_and_due_status() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        let categories = default_categories();
        let mut task = Task::new("badge me".to_string(), categories[0].id);
        task.due_date = Some(today);

        let dto = TaskDto::from_entity(task, &categories, today);
        assert_eq!(dto.category_name(), "Work");
        assert_eq!(dto.due_status, Some(DueStatus::Today));
    }
}
