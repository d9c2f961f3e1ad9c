use std::io;
use std::sync::Arc;

use crate::domain::task::model::{self, Task};
use crate::error::AppError;
use crate::storage::BlobStore;

type Result<T> = std::result::Result<T, AppError>;

/// An uploaded file attached to a task, stored under its original name.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub name: String,
    pub data: Vec<u8>,
}

/// Per-user task documents over the blob store.
///
/// One JSON document per user at `{username}.json`; every mutation is a
/// whole-document read-modify-write across two store calls with no
/// conditional write, so concurrent mutations for one user can lose updates
/// (both load the same base, the later put wins). Only `create` is atomic,
/// through the store's create-if-absent put.
#[derive(Clone)]
pub struct TaskRepository {
    store: Arc<dyn BlobStore>,
}

impl TaskRepository {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }

    fn document_key(username: &str) -> Result<String> {
        if username.is_empty() {
            return Err(AppError::InvalidArgument(
                "Username is required".to_string(),
            ));
        }
        Ok(format!("{username}.json"))
    }

    pub async fn exists(&self, username: &str) -> Result<bool> {
        let key = Self::document_key(username)?;
        Ok(self.store.exists(&key).await?)
    }

    pub async fn create(&self, username: &str) -> Result<()> {
        let key = Self::document_key(username)?;
        let empty = model::encode(&[])?;
        match self.store.put(&key, &empty, false).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(AppError::DocumentExists(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Loads a user's document. A missing key and an undecodable document
    /// both report `DocumentNotFound`; corruption is deliberately not
    /// distinguished from absence.
    pub async fn load(&self, username: &str) -> Result<Vec<Task>> {
        let key = Self::document_key(username)?;
        match self.store.get(&key).await {
            Ok(bytes) => {
                model::decode(&bytes).map_err(|_| AppError::DocumentNotFound(username.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AppError::DocumentNotFound(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Appends a task, creating the document implicitly when absent. An
    /// attached file is stored first, under its original name, overwriting
    /// any object already there; the task then carries the store's public
    /// url for that name.
    pub async fn append_task(
        &self,
        username: &str,
        text: &str,
        file: Option<FileAttachment>,
    ) -> Result<Task> {
        let key = Self::document_key(username)?;
        let mut tasks = match self.load(username).await {
            Ok(tasks) => tasks,
            Err(AppError::DocumentNotFound(_)) => Vec::new(),
            Err(e) => return Err(e),
        };

        let file_url = match file {
            Some(file) => {
                self.store.put(&file.name, &file.data, true).await?;
                Some(self.store.url_for(&file.name))
            }
            None => None,
        };

        let task = Task::next(&tasks, text, file_url);
        tasks.push(task.clone());
        self.store.put(&key, &model::encode(&tasks)?, true).await?;
        Ok(task)
    }

    /// Marks the task with `task_id` completed and stores the document back.
    pub async fn complete_task(&self, username: &str, task_id: u64) -> Result<Task> {
        let key = Self::document_key(username)?;
        let mut tasks = self.load(username).await?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(AppError::TaskNotFound(task_id))?;
        task.completed = true;
        let task = task.clone();

        self.store.put(&key, &model::encode(&tasks)?, true).await?;
        Ok(task)
    }
}
