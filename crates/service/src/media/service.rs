use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::store::ObjectStore;
use crate::errors::ServiceError;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// File extension for an accepted image content type.
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    match mime.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

pub struct MediaService {
    store: Arc<dyn ObjectStore>,
    max_upload_bytes: usize,
}

impl MediaService {
    pub fn new(store: Arc<dyn ObjectStore>, max_upload_bytes: usize) -> Self {
        Self { store, max_upload_bytes }
    }

    pub fn max_upload_bytes(&self) -> usize { self.max_upload_bytes }

    /// Store an image for a service under `services/{service_id}/{uuid}.{ext}`.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload_service_image(&self, service_id: Uuid, content_type: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let ext = image_extension(content_type)
            .ok_or_else(|| ServiceError::Validation(format!("unsupported image type '{content_type}'")))?;
        if bytes.is_empty() {
            return Err(ServiceError::Validation("image is empty".into()));
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(ServiceError::Validation(format!("image exceeds {} bytes", self.max_upload_bytes)));
        }
        let key = format!("services/{service_id}/{}.{ext}", Uuid::new_v4());
        let url = self.store.put(&key, bytes, content_type).await?;
        info!(%service_id, %url, "service_image_uploaded");
        Ok(url)
    }

    /// Drop a stored image that no service points at any more. URLs this
    /// store did not issue are left alone; failures are only logged.
    pub async fn discard(&self, url: &str) {
        let Some(key) = self.store.key_for_url(url) else { return };
        match self.store.delete(&key).await {
            Ok(()) => info!(%url, "service_image_discarded"),
            Err(e) => warn!(%url, error = %e, "failed to discard image"),
        }
    }
}
