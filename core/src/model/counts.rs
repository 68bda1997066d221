use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::filter::{due_status, DueStatus, Filter};
use crate::model::task::{Priority, Task};

/// Sidebar tallies over the complete task set.
///
/// Recomputed wholesale whenever the set changes; the expected volume makes
/// a full pass cheaper than keeping incremental counters honest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCounts {
    /// Every record, completed or not. Drives the header progress readout.
    pub total: usize,
    /// Incomplete tasks, the default view.
    pub all: usize,
    pub completed: usize,
    pub today: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Incomplete tasks per category.
    pub by_category: HashMap<Uuid, usize>,
}

impl TaskCounts {
    /// Single pass over `tasks`. Date buckets, priority and category tallies
    /// only count incomplete tasks; a task due today counts toward both
    /// `today` and `upcoming`.
    pub fn tally(tasks: &[Task], today: NaiveDate) -> TaskCounts {
        let mut counts = TaskCounts::default();
        for task in tasks {
            counts.total += 1;
            if task.completed {
                counts.completed += 1;
                continue;
            }
            counts.all += 1;
            match task.priority {
                Priority::High => counts.high += 1,
                Priority::Medium => counts.medium += 1,
                Priority::Low => counts.low += 1,
            }
            *counts.by_category.entry(task.category_id).or_insert(0) += 1;
            match due_status(task, today) {
                Some(DueStatus::Overdue) => counts.overdue += 1,
                Some(DueStatus::Today) => {
                    counts.today += 1;
                    counts.upcoming += 1;
                }
                Some(DueStatus::Upcoming) => counts.upcoming += 1,
                None => {}
            }
        }
        counts
    }

    /// The number shown next to a sidebar entry. Search has no badge.
    pub fn get(&self, filter: &Filter) -> Option<usize> {
        match filter {
            Filter::All => Some(self.all),
            Filter::Today => Some(self.today),
            Filter::Upcoming => Some(self.upcoming),
            Filter::Overdue => Some(self.overdue),
            Filter::Completed => Some(self.completed),
            Filter::Priority(Priority::High) => Some(self.high),
            Filter::Priority(Priority::Medium) => Some(self.medium),
            Filter::Priority(Priority::Low) => Some(self.low),
            Filter::Category(id) => Some(self.by_category.get(id).copied().unwrap_or(0)),
            Filter::Search(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn build(today: NaiveDate) -> Vec<Task> {
        let cat_a = Uuid::new_v4();
        let cat_b = Uuid::new_v4();

        let mut overdue = Task::new("overdue".to_string(), cat_a);
        overdue.due_date = Some(today - Duration::days(2));
        overdue.priority = Priority::High;

        let mut due_today = Task::new("today".to_string(), cat_a);
        due_today.due_date = Some(today);

        let mut later = Task::new("later".to_string(), cat_b);
        later.due_date = Some(today + Duration::days(5));
        later.priority = Priority::Low;

        let undated = Task::new("undated".to_string(), cat_b);

        let mut done = Task::new("done".to_string(), cat_a);
        done.complete();

        vec![overdue, due_today, later, undated, done]
    }

    #[test]
    fn buckets_tally_once_per_task() {
        let today = day(2026, 8, 7);
        let counts = TaskCounts::tally(&build(today), today);

        assert_eq!(counts.total, 5);
        assert_eq!(counts.all, 4);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.overdue, 1);
        assert_eq!(counts.today, 1);
        // Due-today counts toward upcoming as well.
        assert_eq!(counts.upcoming, 2);
    }

    #[test]
    fn priority_tallies_sum_to_incomplete_total() {
        let today = day(2026, 8, 7);
        let counts = TaskCounts::tally(&build(today), today);

        assert_eq!(counts.high + counts.medium + counts.low, counts.all);
    }

    #[test]
    fn category_tallies_sum_to_incomplete_total() {
        let today = day(2026, 8, 7);
        let counts = TaskCounts::tally(&build(today), today);

        let sum: usize = counts.by_category.values().sum();
        assert_eq!(sum, counts.all);
    }

    #[test]
    fn empty_set_tallies_to_zero() {
        let counts = TaskCounts::tally(&[], day(2026, 8, 7));
        assert_eq!(counts, TaskCounts::default());
    }
}
