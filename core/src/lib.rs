pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use error::{Result, StoreError};
pub use input::{expand_key, parse_args, resolve_category, to_new_task, to_patch, ParsedInput};
pub use model::category::{default_categories, Category, CategoryPatch};
pub use model::counts::TaskCounts;
pub use model::filter::{due_status, DueStatus, Filter};
pub use model::task::{NewTask, Priority, Task, TaskPatch};
pub use repository::{
    CategoryRepository, FileCategoryRepository, FileTaskRepository, MemCategoryRepository,
    MemTaskRepository, TaskRepository,
};
pub use service::{CategoryService, TaskDto, TaskService};
pub use time::{parse_human_date, today};
pub use usecase::{Board, BoardView};
