use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::category::Category;
use crate::model::task::{NewTask, Priority, TaskPatch};
use crate::time::parse_human_date;

/// Metadata keys accepted by the quick-add and edit surfaces.
pub const KNOWN_KEYS: &[&str] = &["due", "category", "priority", "description"];

/// A quick-add line split into free text and `key:value` metadata.
#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub metadata: HashMap<String, String>,
}

pub fn parse_args(args: &[String]) -> ParsedInput {
    let mut title_parts = Vec::new();
    let mut metadata = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.to_string());
                continue;
            }
        }
        title_parts.push(arg.as_str());
    }

    ParsedInput {
        title: title_parts.join(" "),
        metadata,
    }
}

/// Expands an unambiguous key prefix: `du` means `due`, `pri` means
/// `priority`. Exact matches win outright.
pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(StoreError::validation(format!("unknown key: '{key}'"))),
        _ => Err(StoreError::validation(format!(
            "ambiguous key: '{key}' matches {matches:?}"
        ))),
    }
}

/// Resolves a category token against the known set: name match first
/// (case-insensitive), then unique id prefix.
pub fn resolve_category(token: &str, categories: &[Category]) -> Result<Uuid> {
    if let Some(category) = categories
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(token))
    {
        return Ok(category.id);
    }

    let matches: Vec<&Category> = categories
        .iter()
        .filter(|c| c.id.to_string().starts_with(token))
        .collect();
    match matches.len() {
        1 => Ok(matches[0].id),
        _ => Err(StoreError::validation(format!("unknown category: '{token}'"))),
    }
}

fn normalized(parsed: &ParsedInput) -> Result<HashMap<String, String>> {
    let mut metadata = HashMap::new();
    for (key, value) in &parsed.metadata {
        metadata.insert(expand_key(key, KNOWN_KEYS)?, value.clone());
    }
    Ok(metadata)
}

/// Builds the create-form payload from a parsed quick-add line. A title and
/// a category are required; everything else has defaults.
pub fn to_new_task(parsed: &ParsedInput, categories: &[Category]) -> Result<NewTask> {
    if parsed.title.trim().is_empty() {
        return Err(StoreError::validation("a task title is required"));
    }
    let metadata = normalized(parsed)?;

    let category_id = match metadata.get("category") {
        Some(token) => resolve_category(token, categories)?,
        None => return Err(StoreError::validation("a category is required (category:<name>)")),
    };
    let due_date = match metadata.get("due") {
        Some(token) if token == "none" => None,
        Some(token) => Some(parse_human_date(token)?),
        None => None,
    };
    let priority = match metadata.get("priority") {
        Some(token) => Priority::parse(token)
            .ok_or_else(|| StoreError::validation(format!("unknown priority: '{token}'")))?,
        None => Priority::default(),
    };

    Ok(NewTask {
        title: parsed.title.trim().to_string(),
        description: metadata.get("description").cloned(),
        category_id,
        priority,
        due_date,
    })
}

/// Builds a partial update from an edit line. Free text replaces the title;
/// absent keys leave fields untouched; `due:none` clears the due date.
pub fn to_patch(parsed: &ParsedInput, categories: &[Category]) -> Result<TaskPatch> {
    let metadata = normalized(parsed)?;
    let mut patch = TaskPatch::default();

    if !parsed.title.trim().is_empty() {
        patch.title = Some(parsed.title.trim().to_string());
    }
    if let Some(token) = metadata.get("due") {
        patch.due_date = if token == "none" {
            Some(None)
        } else {
            Some(Some(parse_human_date(token)?))
        };
    }
    if let Some(token) = metadata.get("category") {
        patch.category_id = Some(resolve_category(token, categories)?);
    }
    if let Some(token) = metadata.get("priority") {
        patch.priority = Some(
            Priority::parse(token)
                .ok_or_else(|| StoreError::validation(format!("unknown priority: '{token}'")))?,
        );
    }
    if let Some(description) = metadata.get("description") {
        patch.description = Some(description.clone());
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::category::default_categories;

    fn line(parts: &[&str]) -> ParsedInput {
        let args: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
        parse_args(&args)
    }

    #[test]
    fn splits_title_from_metadata() {
        let parsed = line(&["Pay", "rent", "due:tomorrow", "category:Work"]);
        assert_eq!(parsed.title, "Pay rent");
        assert_eq!(parsed.metadata.get("due"), Some(&"tomorrow".to_string()));
        assert_eq!(parsed.metadata.get("category"), Some(&"Work".to_string()));
    }

    #[test]
    fn expands_unambiguous_prefixes() {
        assert_eq!(expand_key("du", KNOWN_KEYS).unwrap(), "due");
        assert_eq!(expand_key("cat", KNOWN_KEYS).unwrap(), "category");
        assert_eq!(expand_key("pri", KNOWN_KEYS).unwrap(), "priority");
        assert_eq!(expand_key("des", KNOWN_KEYS).unwrap(), "description");

        // "d" matches both due and description.
        assert!(expand_key("d", KNOWN_KEYS).is_err());
        assert!(expand_key("x", KNOWN_KEYS).is_err());
    }

    #[test]
    fn new_task_requires_a_category() {
        let categories = default_categories();
        let err = to_new_task(&line(&["Buy", "milk"]), &categories).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let task = to_new_task(&line(&["Buy", "milk", "cat:shopping"]), &categories).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(
            task.category_id,
            categories.iter().find(|c| c.name == "Shopping").unwrap().id
        );
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn new_task_rejects_bad_priority() {
        let categories = default_categories();
        let err =
            to_new_task(&line(&["x", "cat:Work", "pri:urgent"]), &categories).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn category_resolves_by_id_prefix() {
        let categories = default_categories();
        let work = &categories[0];
        let prefix = &work.id.to_string()[..8];
        assert_eq!(resolve_category(prefix, &categories).unwrap(), work.id);
    }

    #[test]
    fn patch_clears_due_and_keeps_title() {
        let categories = default_categories();
        let patch = to_patch(&line(&["due:none"]), &categories).unwrap();
        assert_eq!(patch.due_date, Some(None));
        assert!(patch.title.is_none());

        let patch = to_patch(&line(&["New", "title", "pri:h"]), &categories).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New title"));
        assert_eq!(patch.priority, Some(Priority::High));
        assert!(patch.due_date.is_none());
    }
}
