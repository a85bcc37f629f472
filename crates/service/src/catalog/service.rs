use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{ServiceInput, ServiceOffer};
use super::repository::ServiceRepository;
use crate::auth::AuthContext;
use crate::directory::repository::BusinessRepository;
use crate::errors::ServiceError;

/// Owner-side management of services plus the public read paths.
pub struct CatalogService {
    repo: Arc<dyn ServiceRepository>,
    businesses: Arc<dyn BusinessRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ServiceRepository>, businesses: Arc<dyn BusinessRepository>) -> Self {
        Self { repo, businesses }
    }

    /// The caller's own business id; it equals the owner's user id.
    async fn owned_business(&self, ctx: &AuthContext) -> Result<Uuid, ServiceError> {
        if !ctx.is_business_owner() {
            return Err(ServiceError::Forbidden("only business owners manage services".into()));
        }
        self.businesses
            .get(ctx.user_id)
            .await?
            .map(|b| b.id)
            .ok_or_else(|| ServiceError::not_found("business"))
    }

    /// Load a service and check it belongs to the caller's business.
    pub async fn get_owned(&self, ctx: &AuthContext, id: Uuid) -> Result<ServiceOffer, ServiceError> {
        let business_id = self.owned_business(ctx).await?;
        let svc = self.get(id).await?;
        if svc.business_id != business_id {
            return Err(ServiceError::Forbidden("service belongs to another business".into()));
        }
        Ok(svc)
    }

    #[instrument(skip(self, input), fields(owner = %ctx.user_id))]
    pub async fn create_service(&self, ctx: &AuthContext, input: ServiceInput) -> Result<ServiceOffer, ServiceError> {
        let business_id = self.owned_business(ctx).await?;
        let input = input.normalized();
        models::service::validate_fields(&input.to_fields(None))?;
        let svc = self.repo.create(business_id, &input).await?;
        info!(service_id = %svc.id, %business_id, "service_created");
        Ok(svc)
    }

    #[instrument(skip(self, input), fields(owner = %ctx.user_id))]
    pub async fn update_service(&self, ctx: &AuthContext, id: Uuid, input: ServiceInput) -> Result<ServiceOffer, ServiceError> {
        self.get_owned(ctx, id).await?;
        let input = input.normalized();
        models::service::validate_fields(&input.to_fields(None))?;
        self.repo.update(id, &input).await
    }

    /// Removes the service only; booking requests that point at it stay.
    #[instrument(skip(self), fields(owner = %ctx.user_id))]
    pub async fn delete_service(&self, ctx: &AuthContext, id: Uuid) -> Result<(), ServiceError> {
        self.get_owned(ctx, id).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("service"));
        }
        info!(service_id = %id, "service_deleted");
        Ok(())
    }

    pub async fn set_image(&self, ctx: &AuthContext, id: Uuid, image_url: &str) -> Result<ServiceOffer, ServiceError> {
        self.get_owned(ctx, id).await?;
        self.repo.set_image(id, image_url).await
    }

    pub async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<ServiceOffer>, ServiceError> {
        self.repo.list_by_business(business_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ServiceOffer, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("service"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::catalog::repository::mock::MockServiceRepository;
    use crate::directory::domain::{BusinessType, NewBusiness};
    use crate::directory::repository::mock::MockBusinessRepository;
    use models::errors::ModelError;

    async fn setup() -> (CatalogService, AuthContext) {
        let businesses = Arc::new(MockBusinessRepository::default());
        let owner = AuthContext::new(Uuid::new_v4(), Role::BusinessOwner);
        businesses
            .create(NewBusiness { owner_id: owner.user_id, business_name: "Drive".into(), business_type: BusinessType::CarRental, location: "Kumasi".into() })
            .await
            .unwrap();
        (CatalogService::new(Arc::new(MockServiceRepository::default()), businesses), owner)
    }

    fn wash(name: &str) -> ServiceInput {
        ServiceInput {
            service_name: name.into(),
            price: "25".into(),
            business_type: BusinessType::CarWash,
            car_name: Some("ignored".into()),
            car_description: None,
            seats: Some(4),
            engine_capacity: None,
            transmission: None,
        }
    }

    fn rental(car_name: Option<&str>) -> ServiceInput {
        ServiceInput {
            service_name: "Weekend rental".into(),
            price: "120.50".into(),
            business_type: BusinessType::CarRental,
            car_name: car_name.map(str::to_string),
            car_description: Some("Compact hatchback".into()),
            seats: Some(5),
            engine_capacity: Some(1600),
            transmission: Some("manual".into()),
        }
    }

    #[tokio::test]
    async fn create_uses_callers_business_and_clears_rental_fields_for_wash() {
        let (svc, owner) = setup().await;
        let s = svc.create_service(&owner, wash(" Full wash ")).await.unwrap();
        assert_eq!(s.business_id, owner.user_id);
        assert_eq!(s.service_name, "Full wash");
        assert!(s.car_name.is_none() && s.seats.is_none());
        assert_eq!(svc.list_by_business(owner.user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rental_without_car_name_is_rejected() {
        let (svc, owner) = setup().await;
        let err = svc.create_service(&owner, rental(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::Validation(_))));
        assert!(svc.create_service(&owner, rental(Some("Yaris"))).await.is_ok());
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let (svc, owner) = setup().await;
        let mut input = wash("Quick");
        input.price = "-3".into();
        assert!(svc.create_service(&owner, input).await.is_err());
    }

    #[tokio::test]
    async fn customers_and_other_owners_cannot_touch_a_service() {
        let (svc, owner) = setup().await;
        let s = svc.create_service(&owner, wash("Full")).await.unwrap();
        let customer = AuthContext::new(Uuid::new_v4(), Role::Customer);
        assert!(matches!(svc.create_service(&customer, wash("x")).await, Err(ServiceError::Forbidden(_))));

        let other = AuthContext::new(Uuid::new_v4(), Role::BusinessOwner);
        svc.businesses
            .create(NewBusiness { owner_id: other.user_id, business_name: "Other".into(), business_type: BusinessType::CarWash, location: "Tema".into() })
            .await
            .unwrap();
        assert!(matches!(svc.delete_service(&other, s.id).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(svc.set_image(&other, s.id, "/media/x.png").await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn update_keeps_image_and_delete_removes() {
        let (svc, owner) = setup().await;
        let s = svc.create_service(&owner, wash("Full")).await.unwrap();
        svc.set_image(&owner, s.id, "/media/services/a.png").await.unwrap();
        let updated = svc.update_service(&owner, s.id, wash("Premium")).await.unwrap();
        assert_eq!(updated.service_name, "Premium");
        assert_eq!(updated.image_url.as_deref(), Some("/media/services/a.png"));

        svc.delete_service(&owner, s.id).await.unwrap();
        assert!(matches!(svc.get(s.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_service(&owner, s.id).await, Err(ServiceError::NotFound(_))));
    }
}
