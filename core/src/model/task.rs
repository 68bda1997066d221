use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub fn parse(s: &str) -> Option<Priority> {
        match s.to_lowercase().as_str() {
            "h" | "high" => Some(Priority::High),
            "m" | "med" | "medium" => Some(Priority::Medium),
            "l" | "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// The lowercase form used in filter keys and serialized records.
    pub fn key(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A to-do record. Owned by the record store; everything here round-trips
/// through it unchanged.
///
/// Invariant: `completed_at` is set if and only if `completed` is true.
/// Mutate completion through `complete`/`reopen`/`set_completed` so the
/// timestamp stays in step.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    // Foreign key into the category store. Deleting a category does not
    // cascade here; views resolve dangling references to "no category".
    pub category_id: Uuid,
    pub priority: Priority,
    // Day granularity. Bucketing compares calendar days, never instants.
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: String, category_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            category_id,
            priority: Priority::default(),
            due_date: None,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn complete(&mut self) {
        if !self.completed {
            self.completed = true;
            self.completed_at = Some(Utc::now());
        }
    }

    pub fn reopen(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    pub fn set_completed(&mut self, done: bool) {
        if done {
            self.complete();
        } else {
            self.reopen();
        }
    }

    /// Case-insensitive substring match over title and description.
    pub fn text_matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

/// Fields accepted by the add form. The store assigns everything else.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

/// A partial update keyed by task id. `None` leaves a field untouched.
/// `due_date` carries a second level so `Some(None)` clears the date.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = if description.is_empty() {
                None
            } else {
                Some(description.clone())
            };
        }
        if let Some(category_id) = self.category_id {
            task.category_id = category_id;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(done) = self.completed {
            task.set_completed(done);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_stamps_and_clears_timestamp() {
        let mut task = Task::new("Water plants".to_string(), Uuid::new_v4());
        assert!(task.completed_at.is_none());

        task.complete();
        assert!(task.completed);
        assert!(task.completed_at.is_some());

        // Completing again must not move the timestamp.
        let stamp = task.completed_at;
        task.complete();
        assert_eq!(task.completed_at, stamp);

        task.reopen();
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn patch_leaves_unset_fields_alone() {
        let mut task = Task::new("Call dentist".to_string(), Uuid::new_v4());
        task.due_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        task.description = Some("ask about invoice".to_string());

        let patch = TaskPatch {
            priority: Some(Priority::High),
            ..Default::default()
        };
        patch.apply(&mut task);

        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.title, "Call dentist");
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(task.description.as_deref(), Some("ask about invoice"));
    }

    #[test]
    fn patch_clears_due_date_with_inner_none() {
        let mut task = Task::new("Renew passport".to_string(), Uuid::new_v4());
        task.due_date = NaiveDate::from_ymd_opt(2026, 5, 20);

        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        patch.apply(&mut task);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn text_match_covers_title_and_description() {
        let mut task = Task::new("Buy groceries".to_string(), Uuid::new_v4());
        task.description = Some("Milk, eggs, SPINACH".to_string());

        assert!(task.text_matches("groc"));
        assert!(task.text_matches("spinach"));
        assert!(!task.text_matches("dentist"));
    }
}
