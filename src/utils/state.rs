use std::sync::Arc;

use crate::config::Config;
use crate::domain::task::TaskRepository;
use crate::storage::{
    BlobStore,
    driver::{filesystem::FilesystemStorage, memory::MemoryStorage},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlobStore>,
    pub tasks: TaskRepository,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store: Arc<dyn BlobStore + Send + Sync> = match config.storage_typ.as_str() {
            "MEMORY" => Arc::new(MemoryStorage::new(&config.public_url)),
            "FILESYSTEM" => Arc::new(FilesystemStorage::new(&config.root_dir, &config.public_url)),
            _ => Arc::new(FilesystemStorage::new(&config.root_dir, &config.public_url)),
        };

        AppState {
            tasks: TaskRepository::new(store.clone()),
            store,
            config: Arc::new(config),
        }
    }
}
