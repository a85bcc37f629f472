use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::catalog::domain::{ServiceInput, ServiceOffer};
use crate::catalog::repository::ServiceRepository;
use crate::errors::ServiceError;

use models::service;

pub struct SeaOrmServiceRepository {
    pub db: DatabaseConnection,
}

pub(crate) fn to_domain(m: service::Model) -> Result<ServiceOffer, ServiceError> {
    Ok(ServiceOffer {
        id: m.id,
        business_id: m.business_id,
        business_type: m.business_type.parse().map_err(ServiceError::Db)?,
        service_name: m.service_name,
        price: m.price,
        car_name: m.car_name,
        car_description: m.car_description,
        seats: m.seats,
        engine_capacity: m.engine_capacity,
        transmission: m.transmission,
        image_url: m.image_url,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    })
}

impl SeaOrmServiceRepository {
    async fn find(&self, id: Uuid) -> Result<service::Model, ServiceError> {
        service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("service"))
    }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn create(&self, business_id: Uuid, input: &ServiceInput) -> Result<ServiceOffer, ServiceError> {
        to_domain(service::create(&self.db, business_id, input.to_fields(None)).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<ServiceOffer>, ServiceError> {
        let m = service::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        m.map(to_domain).transpose()
    }

    async fn get_many(&self, ids: &[Uuid]) -> Result<Vec<ServiceOffer>, ServiceError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = service::Entity::find()
            .filter(service::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<ServiceOffer>, ServiceError> {
        let rows = service::Entity::find()
            .filter(service::Column::BusinessId.eq(business_id))
            .order_by_asc(service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn update(&self, id: Uuid, input: &ServiceInput) -> Result<ServiceOffer, ServiceError> {
        let current = self.find(id).await?;
        to_domain(service::overwrite(&self.db, id, input.to_fields(current.image_url)).await?)
    }

    async fn set_image(&self, id: Uuid, image_url: &str) -> Result<ServiceOffer, ServiceError> {
        let mut am: service::ActiveModel = self.find(id).await?.into();
        am.image_url = Set(Some(image_url.to_string()));
        am.updated_at = Set(Utc::now().into());
        let m = am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        to_domain(m)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(service::hard_delete(&self.db, id).await?)
    }
}
