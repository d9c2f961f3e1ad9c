pub mod files;
pub mod tasks;
