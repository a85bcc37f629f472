use std::sync::Arc;

use common::pagination::Pagination;
use common::types::Page;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::domain::Business;
use super::repository::BusinessRepository;
use crate::errors::ServiceError;

/// Read side of the business directory.
pub struct DirectoryService {
    repo: Arc<dyn BusinessRepository>,
}

impl DirectoryService {
    pub fn new(repo: Arc<dyn BusinessRepository>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_businesses(&self, search: Option<&str>, page: Pagination) -> Result<Page<Business>, ServiceError> {
        let page = page.clamped();
        let (items, total) = self.repo.search(search, page).await?;
        debug!(count = items.len(), total, "businesses listed");
        Ok(Page { items, page: page.page, per_page: page.per_page, total })
    }

    pub async fn get_business(&self, id: Uuid) -> Result<Business, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("business"))
    }
}
