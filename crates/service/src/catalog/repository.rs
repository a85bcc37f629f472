use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{ServiceInput, ServiceOffer};
use crate::errors::ServiceError;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, business_id: Uuid, input: &ServiceInput) -> Result<ServiceOffer, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<ServiceOffer>, ServiceError>;
    /// Services among `ids` that still exist; missing ids are skipped.
    async fn get_many(&self, ids: &[Uuid]) -> Result<Vec<ServiceOffer>, ServiceError>;
    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<ServiceOffer>, ServiceError>;
    /// Overwrite the form fields, keeping the stored image.
    async fn update(&self, id: Uuid, input: &ServiceInput) -> Result<ServiceOffer, ServiceError>;
    async fn set_image(&self, id: Uuid, image_url: &str) -> Result<ServiceOffer, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// In-memory implementation for tests.
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockServiceRepository {
        rows: RwLock<HashMap<Uuid, ServiceOffer>>,
    }

    fn apply(s: &mut ServiceOffer, input: &ServiceInput) {
        s.service_name = input.service_name.clone();
        s.price = input.price.clone();
        s.business_type = input.business_type;
        s.car_name = input.car_name.clone();
        s.car_description = input.car_description.clone();
        s.seats = input.seats;
        s.engine_capacity = input.engine_capacity;
        s.transmission = input.transmission.clone();
        s.updated_at = Utc::now();
    }

    #[async_trait]
    impl ServiceRepository for MockServiceRepository {
        async fn create(&self, business_id: Uuid, input: &ServiceInput) -> Result<ServiceOffer, ServiceError> {
            let now = Utc::now();
            let mut s = ServiceOffer {
                id: Uuid::new_v4(),
                business_id,
                service_name: String::new(),
                price: String::new(),
                business_type: input.business_type,
                car_name: None,
                car_description: None,
                seats: None,
                engine_capacity: None,
                transmission: None,
                image_url: None,
                created_at: now,
                updated_at: now,
            };
            apply(&mut s, input);
            self.rows.write().await.insert(s.id, s.clone());
            Ok(s)
        }

        async fn get(&self, id: Uuid) -> Result<Option<ServiceOffer>, ServiceError> {
            Ok(self.rows.read().await.get(&id).cloned())
        }

        async fn get_many(&self, ids: &[Uuid]) -> Result<Vec<ServiceOffer>, ServiceError> {
            let rows = self.rows.read().await;
            Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
        }

        async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<ServiceOffer>, ServiceError> {
            let rows = self.rows.read().await;
            let mut out: Vec<_> = rows.values().filter(|s| s.business_id == business_id).cloned().collect();
            out.sort_by_key(|s| s.created_at);
            Ok(out)
        }

        async fn update(&self, id: Uuid, input: &ServiceInput) -> Result<ServiceOffer, ServiceError> {
            let mut rows = self.rows.write().await;
            let s = rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("service"))?;
            apply(s, input);
            Ok(s.clone())
        }

        async fn set_image(&self, id: Uuid, image_url: &str) -> Result<ServiceOffer, ServiceError> {
            let mut rows = self.rows.write().await;
            let s = rows.get_mut(&id).ok_or_else(|| ServiceError::not_found("service"))?;
            s.image_url = Some(image_url.to_string());
            s.updated_at = Utc::now();
            Ok(s.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.rows.write().await.remove(&id).is_some())
        }
    }
}
