use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use service::auth::AuthContext;
use service::booking::domain::{BookingRequest, CustomerRequestView, OwnerRequestView};
use service::booking::RequestStatus;

use crate::errors::JsonApiError;
use crate::observability::{BOOKINGS_CREATED_TOTAL, BOOKINGS_PAID_TOTAL, BOOKING_DECISIONS_TOTAL};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateRequestInput {
    pub service_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusInput {
    pub status: RequestStatus,
}

/// Owners see incoming requests, customers their own bookings.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RequestList {
    Incoming(Vec<OwnerRequestView>),
    Own(Vec<CustomerRequestView>),
}

#[utoipa::path(post, path = "/requests", tag = "requests", request_body = crate::openapi::CreateRequestDoc, responses((status = 201, description = "Booked"), (status = 403, description = "Forbidden"), (status = 404, description = "Service Not Found")))]
pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(input): Json<CreateRequestInput>,
) -> Result<(StatusCode, Json<BookingRequest>), JsonApiError> {
    let req = state.bookings.create_request(&ctx, input.service_id).await?;
    BOOKINGS_CREATED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(req)))
}

#[utoipa::path(get, path = "/requests", tag = "requests", responses((status = 200, description = "Requests visible to the caller")))]
pub async fn list(State(state): State<AppState>, Extension(ctx): Extension<AuthContext>) -> Result<Json<RequestList>, JsonApiError> {
    let list = if ctx.is_business_owner() {
        RequestList::Incoming(state.bookings.list_for_owner(&ctx).await?)
    } else {
        RequestList::Own(state.bookings.list_for_customer(&ctx).await?)
    };
    Ok(Json(list))
}

#[utoipa::path(get, path = "/requests/{id}", tag = "requests", params(("id" = Uuid, Path, description = "Request ID")), responses((status = 200, description = "OK"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Extension(ctx): Extension<AuthContext>, Path(id): Path<Uuid>) -> Result<Json<BookingRequest>, JsonApiError> {
    Ok(Json(state.bookings.get(&ctx, id).await?))
}

#[utoipa::path(put, path = "/requests/{id}/status", tag = "requests", params(("id" = Uuid, Path, description = "Request ID")), request_body = crate::openapi::SetStatusDoc, responses((status = 200, description = "Status changed"), (status = 400, description = "Invalid status"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn set_status(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(input): Json<SetStatusInput>,
) -> Result<Json<BookingRequest>, JsonApiError> {
    let updated = state.bookings.set_status(&ctx, id, input.status).await?;
    BOOKING_DECISIONS_TOTAL.with_label_values(&[input.status.as_str()]).inc();
    Ok(Json(updated))
}

#[utoipa::path(put, path = "/requests/{id}/paid", tag = "requests", params(("id" = Uuid, Path, description = "Request ID")), responses((status = 200, description = "Marked paid"), (status = 403, description = "Forbidden"), (status = 409, description = "Not accepted yet")))]
pub async fn set_paid(State(state): State<AppState>, Extension(ctx): Extension<AuthContext>, Path(id): Path<Uuid>) -> Result<Json<BookingRequest>, JsonApiError> {
    let updated = state.bookings.set_paid(&ctx, id).await?;
    BOOKINGS_PAID_TOTAL.inc();
    Ok(Json(updated))
}
