pub mod category;
pub mod counts;
pub mod filter;
pub mod task;

pub use category::{default_categories, Category, CategoryPatch};
pub use counts::TaskCounts;
pub use filter::{due_status, DueStatus, Filter};
pub use task::{NewTask, Priority, Task, TaskPatch};
