use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::booking::domain::{BookingRequest, RequestStatus};
use crate::booking::errors::BookingError;
use crate::booking::repository::BookingRepository;

use models::request;

pub struct SeaOrmBookingRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: request::Model) -> Result<BookingRequest, BookingError> {
    Ok(BookingRequest {
        id: m.id,
        user_id: m.user_id,
        service_id: m.service_id,
        status: m.status.parse().map_err(BookingError::Repository)?,
        paid: m.paid,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

fn all_to_domain(rows: Vec<request::Model>) -> Result<Vec<BookingRequest>, BookingError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn insert(&self, user_id: Uuid, service_id: Uuid) -> Result<BookingRequest, BookingError> {
        to_domain(request::create(&self.db, user_id, service_id).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<BookingRequest>, BookingError> {
        let m = request::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| BookingError::Repository(e.to_string()))?;
        m.map(to_domain).transpose()
    }

    async fn update_status(&self, id: Uuid, status: RequestStatus, reset_paid: bool) -> Result<BookingRequest, BookingError> {
        to_domain(request::update_status(&self.db, id, status.as_str(), reset_paid).await?)
    }

    async fn mark_paid(&self, id: Uuid) -> Result<BookingRequest, BookingError> {
        to_domain(request::mark_paid(&self.db, id).await?)
    }

    async fn list_by_services(&self, service_ids: &[Uuid]) -> Result<Vec<BookingRequest>, BookingError> {
        all_to_domain(request::list_by_services(&self.db, service_ids).await?)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<BookingRequest>, BookingError> {
        all_to_domain(request::list_by_user(&self.db, user_id).await?)
    }
}
