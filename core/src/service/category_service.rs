use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::category::{Category, CategoryPatch};
use crate::repository::CategoryRepository;

pub struct CategoryService<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_category(&self, name: &str, color: &str, icon: &str) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(StoreError::validation("a category name is required"));
        }
        let created = self.repo.create(Category::new(
            name.trim().to_string(),
            color.to_string(),
            icon.to_string(),
        ))?;
        debug!(id = %created.id, name = %created.name, "category created");
        Ok(created)
    }

    pub fn list(&self) -> Result<Vec<Category>> {
        self.repo.list()
    }

    pub fn get(&self, id: &Uuid) -> Result<Category> {
        self.repo.get(id)
    }

    pub fn update(&self, id: &Uuid, patch: &CategoryPatch) -> Result<Category> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(StoreError::validation("a category name is required"));
            }
        }
        let mut category = self.repo.get(id)?;
        patch.apply(&mut category);
        self.repo.update(&category)?;
        Ok(category)
    }

    /// Deletes the category only. Tasks referencing it keep their dangling
    /// id and render without a category.
    pub fn delete(&self, id: &Uuid) -> Result<()> {
        self.repo.delete(id)?;
        debug!(%id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemCategoryRepository;

    #[test]
    fn create_rejects_blank_name() {
        let service = CategoryService::new(MemCategoryRepository::with_categories(vec![]));
        let err = service.create_category("  ", "#FFFFFF", "Tag").unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn rename_keeps_other_fields() {
        let service = CategoryService::new(MemCategoryRepository::with_categories(vec![]));
        let created = service.create_category("Chores", "#10B981", "Home").unwrap();

        let patch = CategoryPatch {
            name: Some("Household".to_string()),
            ..Default::default()
        };
        let updated = service.update(&created.id, &patch).unwrap();
        assert_eq!(updated.name, "Household");
        assert_eq!(updated.color, "#10B981");
        assert_eq!(updated.icon, "Home");
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let service = CategoryService::new(MemCategoryRepository::with_categories(vec![]));
        assert!(matches!(
            service.delete(&Uuid::new_v4()),
            Err(StoreError::NotFound { .. })
        ));
    }
}
