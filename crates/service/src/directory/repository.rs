use async_trait::async_trait;
use common::pagination::Pagination;
use uuid::Uuid;

use super::domain::{Business, NewBusiness};
use crate::errors::ServiceError;

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn create(&self, input: NewBusiness) -> Result<Business, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Business>, ServiceError>;
    /// Businesses whose name contains `query` (case-insensitive), ordered by
    /// lowercased name; returns the page and the total match count.
    async fn search(&self, query: Option<&str>, page: Pagination) -> Result<(Vec<Business>, u64), ServiceError>;
}

/// In-memory implementation for tests.
pub mod mock {
    use super::*;
    use crate::directory::domain::name_matches;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockBusinessRepository {
        rows: RwLock<HashMap<Uuid, Business>>,
    }

    #[async_trait]
    impl BusinessRepository for MockBusinessRepository {
        async fn create(&self, input: NewBusiness) -> Result<Business, ServiceError> {
            let b = Business {
                id: input.owner_id,
                business_name: input.business_name,
                business_type: input.business_type,
                location: input.location,
                image_url: None,
            };
            self.rows.write().await.insert(b.id, b.clone());
            Ok(b)
        }

        async fn get(&self, id: Uuid) -> Result<Option<Business>, ServiceError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn search(&self, query: Option<&str>, page: Pagination) -> Result<(Vec<Business>, u64), ServiceError> {
            let rows = self.rows.read().await;
            let mut hits: Vec<Business> = rows
                .values()
                .filter(|b| query.map_or(true, |q| name_matches(&b.business_name, q)))
                .cloned()
                .collect();
            hits.sort_by(|a, b| {
                a.business_name
                    .to_lowercase()
                    .cmp(&b.business_name.to_lowercase())
                    .then_with(|| a.business_name.cmp(&b.business_name))
            });
            let total = hits.len() as u64;
            let (offset, limit) = page.offset_limit();
            Ok((hits.into_iter().skip(offset).take(limit).collect(), total))
        }
    }
}
