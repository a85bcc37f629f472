use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{BookingRequest, RequestStatus};
use super::errors::BookingError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// New request: pending, unpaid, stamped now.
    async fn insert(&self, user_id: Uuid, service_id: Uuid) -> Result<BookingRequest, BookingError>;
    async fn get(&self, id: Uuid) -> Result<Option<BookingRequest>, BookingError>;
    async fn update_status(&self, id: Uuid, status: RequestStatus, reset_paid: bool) -> Result<BookingRequest, BookingError>;
    async fn mark_paid(&self, id: Uuid) -> Result<BookingRequest, BookingError>;
    /// Requests for any of `service_ids`, newest first.
    async fn list_by_services(&self, service_ids: &[Uuid]) -> Result<Vec<BookingRequest>, BookingError>;
    /// A customer's requests, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<BookingRequest>, BookingError>;
}

/// In-memory implementation for tests.
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct MockBookingRepository {
        // insertion sequence breaks created_at ties
        rows: RwLock<HashMap<Uuid, (u64, BookingRequest)>>,
    }

    fn newest_first(mut rows: Vec<(u64, BookingRequest)>) -> Vec<BookingRequest> {
        rows.sort_by(|a, b| (b.1.created_at, b.0).cmp(&(a.1.created_at, a.0)));
        rows.into_iter().map(|(_, r)| r).collect()
    }

    impl MockBookingRepository {
        async fn modify(&self, id: Uuid, f: impl FnOnce(&mut BookingRequest)) -> Result<BookingRequest, BookingError> {
            let mut rows = self.rows.write().await;
            let (_, r) = rows.get_mut(&id).ok_or_else(|| BookingError::NotFound("request not found".into()))?;
            f(r);
            r.updated_at = Utc::now();
            Ok(r.clone())
        }
    }

    #[async_trait]
    impl BookingRepository for MockBookingRepository {
        async fn insert(&self, user_id: Uuid, service_id: Uuid) -> Result<BookingRequest, BookingError> {
            let now = Utc::now();
            let r = BookingRequest {
                id: Uuid::new_v4(),
                user_id,
                service_id,
                status: RequestStatus::Pending,
                paid: false,
                created_at: now,
                updated_at: now,
            };
            let mut rows = self.rows.write().await;
            let seq = rows.len() as u64;
            rows.insert(r.id, (seq, r.clone()));
            Ok(r)
        }

        async fn get(&self, id: Uuid) -> Result<Option<BookingRequest>, BookingError> {
            Ok(self.rows.read().await.get(&id).map(|(_, r)| r.clone()))
        }

        async fn update_status(&self, id: Uuid, status: RequestStatus, reset_paid: bool) -> Result<BookingRequest, BookingError> {
            self.modify(id, |r| {
                r.status = status;
                if reset_paid {
                    r.paid = false;
                }
            })
            .await
        }

        async fn mark_paid(&self, id: Uuid) -> Result<BookingRequest, BookingError> {
            self.modify(id, |r| r.paid = true).await
        }

        async fn list_by_services(&self, service_ids: &[Uuid]) -> Result<Vec<BookingRequest>, BookingError> {
            let rows = self.rows.read().await;
            Ok(newest_first(rows.values().filter(|(_, r)| service_ids.contains(&r.service_id)).cloned().collect()))
        }

        async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<BookingRequest>, BookingError> {
            let rows = self.rows.read().await;
            Ok(newest_first(rows.values().filter(|(_, r)| r.user_id == user_id).cloned().collect()))
        }
    }
}
