use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined grouping label. Color is a `#RRGGBB` hex string and icon
/// is a symbolic name; both are display metadata the store passes through.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Category {
    pub fn new(name: String, color: String, icon: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            icon,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl CategoryPatch {
    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
    }
}

/// The set a fresh install starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new("Work".to_string(), "#6366F1".to_string(), "Briefcase".to_string()),
        Category::new("Personal".to_string(), "#10B981".to_string(), "User".to_string()),
        Category::new("Shopping".to_string(), "#F59E0B".to_string(), "ShoppingCart".to_string()),
        Category::new("Health".to_string(), "#EF4444".to_string(), "Heart".to_string()),
    ]
}
