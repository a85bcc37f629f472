use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::{Extension, Json};
use uuid::Uuid;

use service::auth::AuthContext;
use service::catalog::domain::{ServiceInput, ServiceOffer};

use crate::errors::JsonApiError;
use crate::state::AppState;

#[utoipa::path(get, path = "/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service ID")), responses((status = 200, description = "OK"), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ServiceOffer>, JsonApiError> {
    Ok(Json(state.catalog.get(id).await?))
}

#[utoipa::path(post, path = "/services", tag = "services", request_body = crate::openapi::ServiceInputDoc, responses((status = 201, description = "Created"), (status = 400, description = "Validation Error"), (status = 403, description = "Forbidden")))]
pub async fn create(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Json(input): Json<ServiceInput>,
) -> Result<(StatusCode, Json<ServiceOffer>), JsonApiError> {
    let svc = state.catalog.create_service(&ctx, input).await?;
    Ok((StatusCode::CREATED, Json(svc)))
}

#[utoipa::path(put, path = "/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service ID")), request_body = crate::openapi::ServiceInputDoc, responses((status = 200, description = "Updated"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(input): Json<ServiceInput>,
) -> Result<Json<ServiceOffer>, JsonApiError> {
    Ok(Json(state.catalog.update_service(&ctx, id, input).await?))
}

#[utoipa::path(delete, path = "/services/{id}", tag = "services", params(("id" = Uuid, Path, description = "Service ID")), responses((status = 204, description = "Deleted"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<AppState>, Extension(ctx): Extension<AuthContext>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    let current = state.catalog.get_owned(&ctx, id).await?;
    state.catalog.delete_service(&ctx, id).await?;
    if let Some(image) = current.image_url.as_deref() {
        state.media.discard(image).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Raw image body; `Content-Type` must be png, jpeg or webp.
#[utoipa::path(put, path = "/services/{id}/image", tag = "services", params(("id" = Uuid, Path, description = "Service ID")), responses((status = 200, description = "Image stored"), (status = 400, description = "Unsupported or empty image"), (status = 413, description = "Too large")))]
pub async fn upload_image(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ServiceOffer>, JsonApiError> {
    let current = state.catalog.get_owned(&ctx, id).await?;
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    let url = state.media.upload_service_image(id, content_type, &body).await?;
    match state.catalog.set_image(&ctx, id, &url).await {
        Ok(updated) => {
            if let Some(previous) = current.image_url.as_deref().filter(|p| *p != url) {
                state.media.discard(previous).await;
            }
            Ok(Json(updated))
        }
        Err(e) => {
            state.media.discard(&url).await;
            Err(e.into())
        }
    }
}
