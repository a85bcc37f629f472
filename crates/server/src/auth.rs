//! Bearer-token middleware. Resolves the caller once and hands the
//! [`AuthContext`] to handlers as a request extension.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use service::auth::AuthContext;

use crate::errors::JsonApiError;
use crate::state::AppState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Token from `Authorization: Bearer ...`, falling back to the login cookie.
fn extract_token(req: &Request) -> Result<Option<String>, JsonApiError> {
    if let Some(h) = req.headers().get(AUTHORIZATION) {
        let value = h.to_str().map_err(|_| JsonApiError::unauthorized("malformed Authorization header"))?;
        return match value.strip_prefix("Bearer ") {
            Some(tok) if !tok.trim().is_empty() => Ok(Some(tok.trim().to_string())),
            _ => Err(JsonApiError::unauthorized("expected a Bearer token")),
        };
    }
    let jar = CookieJar::from_headers(req.headers());
    Ok(jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|v| !v.is_empty()))
}

pub async fn require_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = extract_token(&req)? else {
        warn!(%path, "missing bearer token and auth cookie");
        return Err(JsonApiError::unauthorized("sign in required"));
    };
    let ctx: AuthContext = state.auth.authenticate(&token).map_err(|e| {
        warn!(%path, err = %e, "token rejected");
        JsonApiError::unauthorized("invalid or expired token")
    })?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}
