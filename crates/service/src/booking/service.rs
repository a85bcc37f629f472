use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{BookingPolicy, BookingRequest, CustomerRequestView, OwnerRequestView, RequestStatus, UNKNOWN_USER};
use super::errors::BookingError;
use super::repository::BookingRepository;
use crate::auth::repository::AuthRepository;
use crate::auth::AuthContext;
use crate::catalog::domain::ServiceOffer;
use crate::catalog::repository::ServiceRepository;

/// Booking workflow over requests, services and customer profiles.
pub struct BookingService<R: BookingRepository + ?Sized> {
    repo: Arc<R>,
    services: Arc<dyn ServiceRepository>,
    users: Arc<dyn AuthRepository>,
    policy: BookingPolicy,
}

impl<R: BookingRepository + ?Sized> BookingService<R> {
    pub fn new(repo: Arc<R>, services: Arc<dyn ServiceRepository>, users: Arc<dyn AuthRepository>, policy: BookingPolicy) -> Self {
        Self { repo, services, users, policy }
    }

    async fn load(&self, id: Uuid) -> Result<BookingRequest, BookingError> {
        self.repo.get(id).await?.ok_or_else(|| BookingError::NotFound("request not found".into()))
    }

    async fn owns_service_of(&self, ctx: &AuthContext, req: &BookingRequest) -> Result<bool, BookingError> {
        if !ctx.is_business_owner() {
            return Ok(false);
        }
        let svc = self.services.get(req.service_id).await?;
        Ok(svc.map_or(false, |s| s.business_id == ctx.user_id))
    }

    /// Book a service; no duplicate check, every call creates a new request.
    #[instrument(skip(self), fields(user_id = %ctx.user_id))]
    pub async fn create_request(&self, ctx: &AuthContext, service_id: Uuid) -> Result<BookingRequest, BookingError> {
        if !ctx.is_customer() {
            return Err(BookingError::Forbidden("only customers can book services".into()));
        }
        if self.services.get(service_id).await?.is_none() {
            return Err(BookingError::NotFound("service not found".into()));
        }
        let req = self.repo.insert(ctx.user_id, service_id).await?;
        info!(request_id = %req.id, %service_id, "request_created");
        Ok(req)
    }

    /// Owner decision. Overwrites the status and, under the default policy,
    /// clears `paid` even when rejecting.
    #[instrument(skip(self), fields(owner = %ctx.user_id))]
    pub async fn set_status(&self, ctx: &AuthContext, request_id: Uuid, status: RequestStatus) -> Result<BookingRequest, BookingError> {
        if !status.is_decision() {
            return Err(BookingError::Validation("status must be accepted or rejected".into()));
        }
        if !ctx.is_business_owner() {
            return Err(BookingError::Forbidden("only business owners can change a request status".into()));
        }
        let req = self.load(request_id).await?;
        let svc = self
            .services
            .get(req.service_id)
            .await?
            .ok_or_else(|| BookingError::NotFound("service for this request no longer exists".into()))?;
        if svc.business_id != ctx.user_id {
            return Err(BookingError::Forbidden("request belongs to another business".into()));
        }
        let updated = self.repo.update_status(request_id, status, self.policy.reset_paid_on_status_change).await?;
        info!(%request_id, from = %req.status, to = %status, paid = updated.paid, "request_status_changed");
        Ok(updated)
    }

    /// Customer marks the booking paid.
    #[instrument(skip(self), fields(user_id = %ctx.user_id))]
    pub async fn set_paid(&self, ctx: &AuthContext, request_id: Uuid) -> Result<BookingRequest, BookingError> {
        let req = self.load(request_id).await?;
        if req.user_id != ctx.user_id {
            return Err(BookingError::Forbidden("only the booking customer can pay".into()));
        }
        if req.status != RequestStatus::Accepted {
            if self.policy.require_accepted_for_payment {
                return Err(BookingError::InvalidTransition(format!("cannot pay a {} request", req.status)));
            }
            warn!(%request_id, status = %req.status, "paying a request that is not accepted");
        }
        let updated = self.repo.mark_paid(request_id).await?;
        info!(%request_id, "request_paid");
        Ok(updated)
    }

    /// Requests against any service of the caller's business, newest first,
    /// with the service and the customer's name attached.
    #[instrument(skip(self), fields(owner = %ctx.user_id))]
    pub async fn list_for_owner(&self, ctx: &AuthContext) -> Result<Vec<OwnerRequestView>, BookingError> {
        if !ctx.is_business_owner() {
            return Err(BookingError::Forbidden("only business owners have incoming requests".into()));
        }
        let services: HashMap<Uuid, ServiceOffer> = self
            .services
            .list_by_business(ctx.user_id)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        if services.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = services.keys().copied().collect();
        let requests = self.repo.list_by_services(&ids).await?;

        let mut names: HashMap<Uuid, String> = HashMap::new();
        let mut out = Vec::with_capacity(requests.len());
        for request in requests {
            let Some(service) = services.get(&request.service_id).cloned() else { continue };
            let user_full_name = match names.get(&request.user_id) {
                Some(n) => n.clone(),
                None => {
                    let n = self
                        .users
                        .get_user(request.user_id)
                        .await?
                        .map(|u| u.full_name)
                        .unwrap_or_else(|| UNKNOWN_USER.to_string());
                    names.insert(request.user_id, n.clone());
                    n
                }
            };
            out.push(OwnerRequestView { request, service, user_full_name });
        }
        Ok(out)
    }

    /// The caller's own requests, newest first. Requests whose service was
    /// deleted stay in the list with `service: None`.
    #[instrument(skip(self), fields(user_id = %ctx.user_id))]
    pub async fn list_for_customer(&self, ctx: &AuthContext) -> Result<Vec<CustomerRequestView>, BookingError> {
        let requests = self.repo.list_by_user(ctx.user_id).await?;
        let mut ids: Vec<Uuid> = requests.iter().map(|r| r.service_id).collect();
        ids.sort();
        ids.dedup();
        let services: HashMap<Uuid, ServiceOffer> =
            self.services.get_many(&ids).await?.into_iter().map(|s| (s.id, s)).collect();
        Ok(requests
            .into_iter()
            .map(|request| {
                let service = services.get(&request.service_id).cloned();
                CustomerRequestView { request, service }
            })
            .collect())
    }

    /// Single request, visible to its customer and to the owning business.
    pub async fn get(&self, ctx: &AuthContext, request_id: Uuid) -> Result<BookingRequest, BookingError> {
        let req = self.load(request_id).await?;
        if req.user_id == ctx.user_id || self.owns_service_of(ctx, &req).await? {
            return Ok(req);
        }
        Err(BookingError::Forbidden("request belongs to someone else".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::auth::Role;
    use crate::booking::repository::mock::MockBookingRepository;
    use crate::catalog::domain::ServiceInput;
    use crate::catalog::repository::mock::MockServiceRepository;
    use crate::directory::domain::BusinessType;

    struct World {
        bookings: BookingService<MockBookingRepository>,
        services: Arc<MockServiceRepository>,
        owner: AuthContext,
        customer: AuthContext,
        wash: ServiceOffer,
    }

    fn wash_input(name: &str) -> ServiceInput {
        ServiceInput {
            service_name: name.into(),
            price: "30".into(),
            business_type: BusinessType::CarWash,
            car_name: None,
            car_description: None,
            seats: None,
            engine_capacity: None,
            transmission: None,
        }
    }

    async fn world(policy: BookingPolicy) -> World {
        let users = Arc::new(MockAuthRepository::default());
        let owner_user = users.create_user("o@wash.com", "Sparkle", None, Role::BusinessOwner).await.unwrap();
        let customer_user = users.create_user("k@x.com", "Kofi Mensah", None, Role::Customer).await.unwrap();
        let services = Arc::new(MockServiceRepository::default());
        let wash = services.create(owner_user.id, &wash_input("Full wash")).await.unwrap();
        let bookings = BookingService::new(Arc::new(MockBookingRepository::default()), services.clone(), users, policy);
        World {
            bookings,
            services,
            owner: AuthContext::new(owner_user.id, Role::BusinessOwner),
            customer: AuthContext::new(customer_user.id, Role::Customer),
            wash,
        }
    }

    #[tokio::test]
    async fn new_request_is_pending_and_unpaid() {
        let w = world(BookingPolicy::default()).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        assert_eq!(r.status, RequestStatus::Pending);
        assert!(!r.paid);
        assert_eq!(r.user_id, w.customer.user_id);
    }

    #[tokio::test]
    async fn booking_unknown_service_or_as_owner_fails() {
        let w = world(BookingPolicy::default()).await;
        assert!(matches!(w.bookings.create_request(&w.customer, Uuid::new_v4()).await, Err(BookingError::NotFound(_))));
        assert!(matches!(w.bookings.create_request(&w.owner, w.wash.id).await, Err(BookingError::Forbidden(_))));
    }

    #[tokio::test]
    async fn accept_then_pay_flow() {
        let w = world(BookingPolicy::default()).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        let accepted = w.bookings.set_status(&w.owner, r.id, RequestStatus::Accepted).await.unwrap();
        assert_eq!((accepted.status, accepted.paid), (RequestStatus::Accepted, false));
        let paid = w.bookings.set_paid(&w.customer, r.id).await.unwrap();
        assert_eq!((paid.status, paid.paid), (RequestStatus::Accepted, true));
    }

    #[tokio::test]
    async fn status_change_resets_paid_even_on_reject() {
        let w = world(BookingPolicy::default()).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        w.bookings.set_status(&w.owner, r.id, RequestStatus::Accepted).await.unwrap();
        w.bookings.set_paid(&w.customer, r.id).await.unwrap();
        let rejected = w.bookings.set_status(&w.owner, r.id, RequestStatus::Rejected).await.unwrap();
        assert_eq!(rejected.status, RequestStatus::Rejected);
        assert!(!rejected.paid);
    }

    #[tokio::test]
    async fn paid_survives_status_change_when_reset_disabled() {
        let policy = BookingPolicy { reset_paid_on_status_change: false, require_accepted_for_payment: false };
        let w = world(policy).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        w.bookings.set_paid(&w.customer, r.id).await.unwrap();
        let accepted = w.bookings.set_status(&w.owner, r.id, RequestStatus::Accepted).await.unwrap();
        assert!(accepted.paid);
    }

    #[tokio::test]
    async fn default_policy_lets_pending_request_be_paid() {
        let w = world(BookingPolicy::default()).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        let paid = w.bookings.set_paid(&w.customer, r.id).await.unwrap();
        assert_eq!((paid.status, paid.paid), (RequestStatus::Pending, true));
    }

    #[tokio::test]
    async fn strict_policy_rejects_paying_pending_request() {
        let w = world(BookingPolicy::strict()).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        assert!(matches!(w.bookings.set_paid(&w.customer, r.id).await, Err(BookingError::InvalidTransition(_))));
        w.bookings.set_status(&w.owner, r.id, RequestStatus::Accepted).await.unwrap();
        assert!(w.bookings.set_paid(&w.customer, r.id).await.unwrap().paid);
    }

    #[tokio::test]
    async fn only_owning_business_decides_and_only_customer_pays() {
        let w = world(BookingPolicy::default()).await;
        let r = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        let stranger = AuthContext::new(Uuid::new_v4(), Role::BusinessOwner);
        assert!(matches!(w.bookings.set_status(&stranger, r.id, RequestStatus::Accepted).await, Err(BookingError::Forbidden(_))));
        assert!(matches!(w.bookings.set_status(&w.customer, r.id, RequestStatus::Accepted).await, Err(BookingError::Forbidden(_))));
        assert!(matches!(w.bookings.set_status(&w.owner, r.id, RequestStatus::Pending).await, Err(BookingError::Validation(_))));
        assert!(matches!(w.bookings.set_paid(&w.owner, r.id).await, Err(BookingError::Forbidden(_))));
        assert!(matches!(w.bookings.get(&stranger, r.id).await, Err(BookingError::Forbidden(_))));
        assert!(w.bookings.get(&w.owner, r.id).await.is_ok());
    }

    #[tokio::test]
    async fn owner_listing_only_covers_own_services_and_names_customers() {
        let w = world(BookingPolicy::default()).await;
        let other_business = Uuid::new_v4();
        let foreign = w.services.create(other_business, &wash_input("Elsewhere")).await.unwrap();
        w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        w.bookings.create_request(&w.customer, foreign.id).await.unwrap();
        let ghost = AuthContext::new(Uuid::new_v4(), Role::Customer);
        w.bookings.create_request(&ghost, w.wash.id).await.unwrap();

        let views = w.bookings.list_for_owner(&w.owner).await.unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.service.business_id == w.owner.user_id));
        assert_eq!(views[0].user_full_name, UNKNOWN_USER);
        assert_eq!(views[1].user_full_name, "Kofi Mensah");

        let empty = AuthContext::new(Uuid::new_v4(), Role::BusinessOwner);
        assert!(w.bookings.list_for_owner(&empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_service_orphans_but_keeps_requests() {
        let w = world(BookingPolicy::default()).await;
        let first = w.bookings.create_request(&w.customer, w.wash.id).await.unwrap();
        let second = w.services.create(w.owner.user_id, &wash_input("Interior")).await.unwrap();
        w.bookings.create_request(&w.customer, second.id).await.unwrap();
        assert!(w.services.delete(w.wash.id).await.unwrap());

        let mine = w.bookings.list_for_customer(&w.customer).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].service.as_ref().map(|s| s.id), Some(second.id));
        assert_eq!(mine[1].request.id, first.id);
        assert!(mine[1].service.is_none());

        assert!(matches!(w.bookings.set_status(&w.owner, first.id, RequestStatus::Accepted).await, Err(BookingError::NotFound(_))));
        assert_eq!(w.bookings.list_for_owner(&w.owner).await.unwrap().len(), 1);
    }
}
