use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::require_auth;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod auth;
pub mod businesses;
pub mod health;
pub mod requests;
pub mod services;

/// Build the full application router: public, authenticated, docs and media.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.media.max_upload_bytes();

    let public = Router::new()
        .route("/health", get(health::health))
        .route("/metrics", get(health::metrics))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/businesses", get(businesses::list))
        .route("/businesses/:id", get(businesses::get))
        .route("/businesses/:id/services", get(businesses::services))
        .route("/services", post(services::create))
        .route("/services/:id", get(services::get).put(services::update).delete(services::delete))
        .route("/services/:id/image", put(services::upload_image).layer(DefaultBodyLimit::max(upload_limit)))
        .route("/requests", post(requests::create).get(requests::list))
        .route("/requests/:id", get(requests::get))
        .route("/requests/:id/status", put(requests::set_status))
        .route("/requests/:id/paid", put(requests::set_paid))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let media = ServeDir::new(&state.media_dir);

    public
        .merge(protected)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service("/media", media)
        .with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
