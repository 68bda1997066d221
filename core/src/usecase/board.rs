use chrono::NaiveDate;

use crate::error::Result;
use crate::model::category::Category;
use crate::model::counts::TaskCounts;
use crate::model::filter::Filter;
use crate::repository::{CategoryRepository, TaskRepository};
use crate::service::dto::TaskDto;
use crate::service::{CategoryService, TaskService};

/// Screen-level coordinator. Resolves the active filter into the visible
/// task subset and tallies sidebar counts over the full unfiltered set,
/// all in one call so a screen refresh is a single fetch cycle.
pub struct Board<'a, T: TaskRepository, C: CategoryRepository> {
    tasks: &'a TaskService<T>,
    categories: &'a CategoryService<C>,
}

/// Everything one screen needs: the filtered list (with categories and due
/// badges resolved), the counts, and the category set for the sidebar.
#[derive(Debug, Clone)]
pub struct BoardView {
    pub tasks: Vec<TaskDto>,
    pub counts: TaskCounts,
    pub categories: Vec<Category>,
}

impl<'a, T: TaskRepository, C: CategoryRepository> Board<'a, T, C> {
    pub fn new(tasks: &'a TaskService<T>, categories: &'a CategoryService<C>) -> Self {
        Self { tasks, categories }
    }

    pub fn view(&self, filter: &Filter, today: NaiveDate) -> Result<BoardView> {
        let categories = self.categories.list()?;
        let all = self.tasks.all()?;
        let counts = TaskCounts::tally(&all, today);

        let tasks = self
            .tasks
            .list(filter, today)?
            .into_iter()
            .map(|t| TaskDto::from_entity(t, &categories, today))
            .collect();

        Ok(BoardView {
            tasks,
            counts,
            categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{NewTask, Priority};
    use crate::repository::{MemCategoryRepository, MemTaskRepository};
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed(
        tasks: &TaskService<MemTaskRepository>,
        categories: &CategoryService<MemCategoryRepository>,
        today: NaiveDate,
    ) {
        let cats = categories.list().unwrap();
        let work = cats.iter().find(|c| c.name == "Work").unwrap().id;
        let personal = cats.iter().find(|c| c.name == "Personal").unwrap().id;

        for (title, category_id, due, priority, done) in [
            ("file taxes", work, Some(today - Duration::days(1)), Priority::High, false),
            ("standup notes", work, Some(today), Priority::Medium, false),
            ("book flights", personal, Some(today + Duration::days(10)), Priority::Low, false),
            ("old chore", personal, None, Priority::Medium, true),
        ] {
            let task = tasks
                .create_task(NewTask {
                    title: title.to_string(),
                    description: None,
                    category_id,
                    priority,
                    due_date: due,
                })
                .unwrap();
            if done {
                tasks.toggle_complete(&task.id).unwrap();
            }
        }
    }

    #[test]
    fn one_view_call_carries_list_counts_and_categories() {
        let today = day(2026, 8, 7);
        let tasks = TaskService::new(MemTaskRepository::new());
        let categories = CategoryService::new(MemCategoryRepository::new());
        seed(&tasks, &categories, today);

        let board = Board::new(&tasks, &categories);
        let view = board.view(&Filter::All, today).unwrap();

        assert_eq!(view.tasks.len(), 3);
        assert_eq!(view.counts.total, 4);
        assert_eq!(view.counts.all, 3);
        assert_eq!(view.counts.completed, 1);
        assert_eq!(view.counts.overdue, 1);
        assert_eq!(view.counts.today, 1);
        assert_eq!(view.counts.upcoming, 2);
        assert_eq!(view.categories.len(), 4);

        // Counts are over the full set even when the view is narrow.
        let overdue_view = board.view(&Filter::Overdue, today).unwrap();
        assert_eq!(overdue_view.tasks.len(), 1);
        assert_eq!(overdue_view.tasks[0].task.title, "file taxes");
        assert_eq!(overdue_view.counts, view.counts);
    }

    #[test]
    fn aggregates_sum_to_incomplete_total() {
        let today = day(2026, 8, 7);
        let tasks = TaskService::new(MemTaskRepository::new());
        let categories = CategoryService::new(MemCategoryRepository::new());
        seed(&tasks, &categories, today);

        let view = Board::new(&tasks, &categories)
            .view(&Filter::All, today)
            .unwrap();
        let c = &view.counts;
        assert_eq!(c.high + c.medium + c.low, c.all);
        assert_eq!(c.by_category.values().sum::<usize>(), c.all);
    }

    #[test]
    fn category_deletion_leaves_tasks_renderable() {
        let today = day(2026, 8, 7);
        let tasks = TaskService::new(MemTaskRepository::new());
        let categories = CategoryService::new(MemCategoryRepository::new());
        seed(&tasks, &categories, today);

        let work = categories
            .list()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Work")
            .unwrap();
        categories.delete(&work.id).unwrap();

        let view = Board::new(&tasks, &categories)
            .view(&Filter::All, today)
            .unwrap();
        let orphan = view
            .tasks
            .iter()
            .find(|t| t.task.title == "file taxes")
            .unwrap();
        assert!(orphan.category.is_none());
        // The dangling id still tallies under its old category.
        assert_eq!(view.counts.by_category.get(&work.id), Some(&2));
    }
}
