use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::task::{Priority, Task};

/// Day-granularity classification of an incomplete task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Upcoming,
}

/// Which date bucket a task falls in on the given calendar day.
///
/// Completed tasks and tasks without a due date are in no bucket. A task
/// due exactly today is `Today`, never `Overdue`.
pub fn due_status(task: &Task, today: NaiveDate) -> Option<DueStatus> {
    if task.completed {
        return None;
    }
    let due = task.due_date?;
    Some(if due < today {
        DueStatus::Overdue
    } else if due == today {
        DueStatus::Today
    } else {
        DueStatus::Upcoming
    })
}

/// The active sidebar selection, resolved to a predicate over the task set.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Default view: everything not yet completed.
    All,
    Today,
    Upcoming,
    Overdue,
    Completed,
    Priority(Priority),
    Category(Uuid),
    Search(String),
}

impl Default for Filter {
    fn default() -> Self {
        Filter::All
    }
}

impl Filter {
    /// Parses a selection key: `all`, `today`, `upcoming`, `overdue`,
    /// `completed`, `priority-{level}`, `category-{id}`. Anything else is
    /// treated as a free-text search.
    pub fn from_key(key: &str) -> Filter {
        match key {
            "all" => return Filter::All,
            "today" => return Filter::Today,
            "upcoming" => return Filter::Upcoming,
            "overdue" => return Filter::Overdue,
            "completed" => return Filter::Completed,
            _ => {}
        }
        if let Some(level) = key.strip_prefix("priority-") {
            if let Some(priority) = Priority::parse(level) {
                return Filter::Priority(priority);
            }
        }
        if let Some(id) = key.strip_prefix("category-") {
            if let Ok(id) = Uuid::parse_str(id) {
                return Filter::Category(id);
            }
        }
        Filter::Search(key.to_string())
    }

    pub fn key(&self) -> String {
        match self {
            Filter::All => "all".to_string(),
            Filter::Today => "today".to_string(),
            Filter::Upcoming => "upcoming".to_string(),
            Filter::Overdue => "overdue".to_string(),
            Filter::Completed => "completed".to_string(),
            Filter::Priority(p) => format!("priority-{}", p.key()),
            Filter::Category(id) => format!("category-{}", id),
            Filter::Search(text) => text.clone(),
        }
    }

    /// Whether `task` belongs to this view on the given calendar day.
    ///
    /// Priority, category and search views list completed tasks too; the
    /// sidebar counts for those views restrict to incomplete separately.
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Filter::All => !task.completed,
            Filter::Today => due_status(task, today) == Some(DueStatus::Today),
            Filter::Upcoming => matches!(
                due_status(task, today),
                Some(DueStatus::Today) | Some(DueStatus::Upcoming)
            ),
            Filter::Overdue => due_status(task, today) == Some(DueStatus::Overdue),
            Filter::Completed => task.completed,
            Filter::Priority(priority) => task.priority == *priority,
            Filter::Category(id) => task.category_id == *id,
            Filter::Search(query) => task.text_matches(query),
        }
    }
}
