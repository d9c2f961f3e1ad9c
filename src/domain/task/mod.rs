pub mod model;
pub mod repository;

pub use model::Task;
pub use repository::{FileAttachment, TaskRepository};
