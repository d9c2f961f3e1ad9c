use std::path::PathBuf;

use tokio::{
    fs::{self, OpenOptions},
    io::{self, AsyncWriteExt},
};

use crate::storage::BlobStore;

/// One file per key under a flat root directory serving as the blob
/// container. Keys are validated to single path components at the request
/// boundary before they reach this driver.
pub struct FilesystemStorage {
    root: PathBuf,
    public_url: String,
}

impl FilesystemStorage {
    pub fn new(root: &str, public_url: &str) -> Self {
        FilesystemStorage {
            root: PathBuf::from(root),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait::async_trait]
impl BlobStore for FilesystemStorage {
    async fn exists(&self, key: &str) -> io::Result<bool> {
        match fs::metadata(self.object_path(key)).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn get(&self, key: &str) -> io::Result<Vec<u8>> {
        fs::read(self.object_path(key)).await
    }

    async fn put(&self, key: &str, data: &[u8], overwrite: bool) -> io::Result<()> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if overwrite {
            // Stage under a private name and rename into place; a concurrent
            // reader sees the old object or the new one, never a torn file.
            let staging = self.object_path(&format!("{}.{}.tmp", key, uuid::Uuid::new_v4()));
            fs::write(&staging, data).await?;
            fs::rename(&staging, path).await
        } else {
            // O_EXCL create: exactly one of any concurrent callers wins.
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .await?;
            file.write_all(data).await?;
            file.flush().await
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/files/{}", self.public_url, key)
    }
}
