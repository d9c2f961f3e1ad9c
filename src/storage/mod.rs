use tokio::io;

pub mod driver;

/// Key to bytes object store, the only durable collaborator of the service.
///
/// Absence reports as `io::ErrorKind::NotFound`; a refused non-overwriting
/// put as `io::ErrorKind::AlreadyExists`. `put` with `overwrite = false` is
/// the create-if-absent primitive and must be atomic per key.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    async fn exists(&self, key: &str) -> io::Result<bool>;
    async fn get(&self, key: &str) -> io::Result<Vec<u8>>;
    async fn put(&self, key: &str, data: &[u8], overwrite: bool) -> io::Result<()>;
    /// Public url under which the object at `key` can be fetched.
    fn url_for(&self, key: &str) -> String;
}
