use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use common::pagination::{Pagination, DEFAULT_PER_PAGE};
use common::types::Page;
use service::catalog::domain::ServiceOffer;
use service::directory::domain::Business;

use crate::errors::JsonApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive substring of the business name.
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[utoipa::path(get, path = "/businesses", tag = "businesses", params(ListQuery), responses((status = 200, description = "Page of businesses")))]
pub async fn list(State(state): State<AppState>, Query(q): Query<ListQuery>) -> Result<Json<Page<Business>>, JsonApiError> {
    let page = Pagination::new(q.page.unwrap_or(1), q.per_page.unwrap_or(DEFAULT_PER_PAGE));
    Ok(Json(state.directory.list_businesses(q.q.as_deref(), page).await?))
}

#[utoipa::path(get, path = "/businesses/{id}", tag = "businesses", params(("id" = Uuid, Path, description = "Business ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Business>, JsonApiError> {
    Ok(Json(state.directory.get_business(id).await?))
}

#[utoipa::path(get, path = "/businesses/{id}/services", tag = "businesses", params(("id" = Uuid, Path, description = "Business ID")), responses((status = 200, description = "Services of the business"), (status = 404, description = "Not Found")))]
pub async fn services(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Vec<ServiceOffer>>, JsonApiError> {
    state.directory.get_business(id).await?;
    Ok(Json(state.catalog.list_by_business(id).await?))
}
