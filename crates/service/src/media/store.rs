use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::ServiceError;

/// Blob storage addressed by slash-separated keys.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key` and return the public URL.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, ServiceError>;
    /// Remove the object under `key`; a missing object is not an error.
    async fn delete(&self, key: &str) -> Result<(), ServiceError>;
    /// Key of an object this store handed out as `url`, if it is one of ours.
    fn key_for_url(&self, url: &str) -> Option<String>;
}

/// Writes objects below a local directory that the server also serves.
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self { root: root.into(), public_base_url: public_base_url.trim_end_matches('/').to_string() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, ServiceError> {
        let rel = Path::new(key);
        if key.is_empty() || !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(ServiceError::Validation(format!("invalid object key '{key}'")));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, ServiceError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| ServiceError::Db(format!("create {}: {e}", parent.display())))?;
        }
        tokio::fs::write(&path, bytes).await.map_err(|e| ServiceError::Db(format!("write {}: {e}", path.display())))?;
        debug!(%key, %content_type, size = bytes.len(), "object stored");
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    async fn delete(&self, key: &str) -> Result<(), ServiceError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(%key, "object removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Db(format!("remove {}: {e}", path.display()))),
        }
    }

    fn key_for_url(&self, url: &str) -> Option<String> {
        let key = url.strip_prefix(&self.public_base_url)?.strip_prefix('/')?;
        (!key.is_empty()).then(|| key.to_string())
    }
}
