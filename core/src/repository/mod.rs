pub mod file;
pub mod memory;
pub mod traits;

pub use file::{FileCategoryRepository, FileTaskRepository};
pub use memory::{MemCategoryRepository, MemTaskRepository};
pub use traits::{CategoryRepository, TaskRepository};
