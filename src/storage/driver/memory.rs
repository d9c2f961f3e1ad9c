use std::collections::HashMap;
use std::io;

use tokio::sync::RwLock;

use crate::storage::BlobStore;

/// In-memory backend, selectable as storage type `MEMORY` and the fake
/// store the tests run against. Every call takes the map lock once, so the
/// non-overwriting put is an atomic check-and-insert; nothing spans two
/// calls, which keeps the per-key atomicity identical to the real drivers.
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    public_url: String,
}

impl MemoryStorage {
    pub fn new(public_url: &str) -> Self {
        MemoryStorage {
            objects: RwLock::new(HashMap::new()),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryStorage {
    async fn exists(&self, key: &str) -> io::Result<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn get(&self, key: &str) -> io::Result<Vec<u8>> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no object `{key}`")))
    }

    async fn put(&self, key: &str, data: &[u8], overwrite: bool) -> io::Result<()> {
        let mut objects = self.objects.write().await;
        if !overwrite && objects.contains_key(key) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("object `{key}` already exists"),
            ));
        }
        objects.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/files/{}", self.public_url, key)
    }
}
