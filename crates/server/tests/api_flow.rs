use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::sms::NoopSmsSender;
use configs::AppConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::{build_router, AppState, Repositories};

fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = "test-secret-0123456789".into();
    cfg.media.dir = std::env::temp_dir()
        .join(format!("autoease-media-{}", Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    cfg
}

fn build_app() -> Router {
    let cfg = test_config();
    build_router(AppState::new(Repositories::in_memory(&cfg), Arc::new(NoopSmsSender), &cfg))
}

async fn call(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, body))
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => builder.header(header::CONTENT_TYPE, "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    call(app, req).await
}

async fn register_and_login(app: &Router, body: Value) -> anyhow::Result<(String, Uuid)> {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let password = body["password"].as_str().unwrap_or_default().to_string();
    let (status, user) = send(app, "POST", "/auth/register", None, Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED, "register failed: {user}");
    let (status, session) = send(app, "POST", "/auth/login", None, Some(json!({"email": email, "password": password}))).await?;
    assert_eq!(status, StatusCode::OK);
    let token = session["token"].as_str().unwrap_or_default().to_string();
    let id: Uuid = serde_json::from_value(user["id"].clone())?;
    Ok((token, id))
}

async fn owner(app: &Router, name: &str) -> anyhow::Result<(String, Uuid)> {
    register_and_login(
        app,
        json!({
            "role": "businessOwner",
            "email": format!("{}@biz.com", Uuid::new_v4()),
            "password": "OwnerPass1",
            "business_name": name,
            "business_type": "carWash",
            "location": "Accra"
        }),
    )
    .await
}

async fn customer(app: &Router, name: &str) -> anyhow::Result<(String, Uuid)> {
    register_and_login(
        app,
        json!({
            "role": "customer",
            "email": format!("{}@mail.com", Uuid::new_v4()),
            "password": "CustPass1",
            "full_name": name
        }),
    )
    .await
}

async fn create_wash(app: &Router, token: &str) -> anyhow::Result<Value> {
    let (status, svc) = send(
        app,
        "POST",
        "/services",
        Some(token),
        Some(json!({"service_name": "Full wash", "price": "25", "business_type": "carWash"})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "create service failed: {svc}");
    Ok(svc)
}

#[tokio::test]
async fn health_is_public_and_api_needs_a_token() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/businesses", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, "GET", "/businesses", Some("not-a-jwt"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn registration_rejects_bad_input_and_duplicates() -> anyhow::Result<()> {
    let app = build_app();
    let short = json!({"role": "customer", "email": "a@mail.com", "password": "short", "full_name": "Ama"});
    let (status, _) = send(&app, "POST", "/auth/register", None, Some(short)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let ok = json!({"role": "customer", "email": "a@mail.com", "password": "LongEnough1", "full_name": "Ama"});
    let (status, _) = send(&app, "POST", "/auth/register", None, Some(ok.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&app, "POST", "/auth/register", None, Some(ok)).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 1002);

    let (status, _) = send(&app, "POST", "/auth/login", None, Some(json!({"email": "a@mail.com", "password": "wrong-pass"}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn oversized_fields_are_validation_errors() -> anyhow::Result<()> {
    let app = build_app();
    let (token, _) = owner(&app, "Sparkle Wash").await?;
    let long_price = json!({"service_name": "Full wash", "price": "1".repeat(40), "business_type": "carWash"});
    let (status, body) = send(&app, "POST", "/services", Some(&token), Some(long_price)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let long_location = json!({
        "role": "businessOwner",
        "email": "far@biz.com",
        "password": "OwnerPass1",
        "business_name": "Far Away Wash",
        "business_type": "carWash",
        "location": "L".repeat(300)
    });
    let (status, _) = send(&app, "POST", "/auth/register", None, Some(long_location)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_cookie_authenticates_and_me_reports_role() -> anyhow::Result<()> {
    let app = build_app();
    let body = json!({"role": "customer", "email": "c@mail.com", "password": "CookiePass1", "full_name": "Kojo"});
    send(&app, "POST", "/auth/register", None, Some(body)).await?;

    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"email": "c@mail.com", "password": "CookiePass1"}))?))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(set_cookie.starts_with("auth_token="));
    let pair = set_cookie.split(';').next().unwrap_or_default().to_string();

    let req = Request::builder().uri("/auth/me").header(header::COOKIE, pair).body(Body::empty())?;
    let (status, me) = call(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "customer");
    assert_eq!(me["full_name"], "Kojo");

    let (status, _) = send(&app, "POST", "/auth/logout", None, None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn booking_lifecycle_over_http() -> anyhow::Result<()> {
    let app = build_app();
    let (owner_tok, owner_id) = owner(&app, "Sparkle Wash").await?;
    let (cust_tok, _) = customer(&app, "Kofi Mensah").await?;
    let svc = create_wash(&app, &owner_tok).await?;
    let service_id = svc["id"].as_str().unwrap_or_default().to_string();
    assert_eq!(svc["business_id"], owner_id.to_string());

    let (status, page) = send(&app, "GET", "/businesses?q=SPARKLE&page=1&per_page=10", Some(&cust_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["business_name"], "Sparkle Wash");

    let (status, list) = send(&app, "GET", &format!("/businesses/{owner_id}/services"), Some(&cust_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));

    let (status, req) = send(&app, "POST", "/requests", Some(&cust_tok), Some(json!({"service_id": service_id}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(req["status"], "pending");
    assert_eq!(req["paid"], false);
    let rid = req["id"].as_str().unwrap_or_default().to_string();

    let (status, incoming) = send(&app, "GET", "/requests", Some(&owner_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(incoming[0]["id"], rid);
    assert_eq!(incoming[0]["user_full_name"], "Kofi Mensah");
    assert_eq!(incoming[0]["service"]["service_name"], "Full wash");

    let (status, _) = send(&app, "PUT", &format!("/requests/{rid}/status"), Some(&cust_tok), Some(json!({"status": "accepted"}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, accepted) = send(&app, "PUT", &format!("/requests/{rid}/status"), Some(&owner_tok), Some(json!({"status": "accepted"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!((accepted["status"].clone(), accepted["paid"].clone()), (json!("accepted"), json!(false)));

    let (status, paid) = send(&app, "PUT", &format!("/requests/{rid}/paid"), Some(&cust_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!((paid["status"].clone(), paid["paid"].clone()), (json!("accepted"), json!(true)));

    let (status, rejected) = send(&app, "PUT", &format!("/requests/{rid}/status"), Some(&owner_tok), Some(json!({"status": "rejected"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["paid"], false);

    let (status, _) = send(&app, "PUT", &format!("/requests/{rid}/status"), Some(&owner_tok), Some(json!({"status": "pending"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, mine) = send(&app, "GET", "/requests", Some(&cust_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["service"]["id"], service_id);
    Ok(())
}

#[tokio::test]
async fn other_owners_cannot_manage_foreign_services_or_requests() -> anyhow::Result<()> {
    let app = build_app();
    let (owner_tok, _) = owner(&app, "First Wash").await?;
    let (rival_tok, _) = owner(&app, "Rival Wash").await?;
    let (cust_tok, _) = customer(&app, "Esi").await?;
    let svc = create_wash(&app, &owner_tok).await?;
    let sid = svc["id"].as_str().unwrap_or_default().to_string();
    let (_, req) = send(&app, "POST", "/requests", Some(&cust_tok), Some(json!({"service_id": sid}))).await?;
    let rid = req["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/services/{sid}"), Some(&rival_tok), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "PUT", &format!("/requests/{rid}/status"), Some(&rival_tok), Some(json!({"status": "accepted"}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "GET", &format!("/requests/{rid}"), Some(&rival_tok), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, list) = send(&app, "GET", "/requests", Some(&rival_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([]));

    let (status, _) = send(&app, "POST", "/requests", Some(&owner_tok), Some(json!({"service_id": sid}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, "POST", "/services", Some(&cust_tok), Some(json!({"service_name": "x", "price": "1", "business_type": "carWash"}))).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn deleted_service_leaves_customer_request_orphaned() -> anyhow::Result<()> {
    let app = build_app();
    let (owner_tok, _) = owner(&app, "Gone Wash").await?;
    let (cust_tok, _) = customer(&app, "Yaw").await?;
    let svc = create_wash(&app, &owner_tok).await?;
    let sid = svc["id"].as_str().unwrap_or_default().to_string();
    let (_, req) = send(&app, "POST", "/requests", Some(&cust_tok), Some(json!({"service_id": sid}))).await?;
    let rid = req["id"].as_str().unwrap_or_default().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/services/{sid}"), Some(&owner_tok), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, mine) = send(&app, "GET", "/requests", Some(&cust_tok), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine[0]["id"], rid);
    assert_eq!(mine[0]["service"], Value::Null);

    let (status, _) = send(&app, "PUT", &format!("/requests/{rid}/status"), Some(&owner_tok), Some(json!({"status": "accepted"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn service_image_upload_is_stored_and_served() -> anyhow::Result<()> {
    let app = build_app();
    let (owner_tok, _) = owner(&app, "Photo Wash").await?;
    let svc = create_wash(&app, &owner_tok).await?;
    let sid = svc["id"].as_str().unwrap_or_default().to_string();

    let upload = |ct: &'static str, bytes: Vec<u8>| {
        Request::builder()
            .method("PUT")
            .uri(format!("/services/{sid}/image"))
            .header(header::AUTHORIZATION, format!("Bearer {owner_tok}"))
            .header(header::CONTENT_TYPE, ct)
            .body(Body::from(bytes))
    };

    let (status, _) = call(&app, upload("image/gif", vec![1, 2, 3])?).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let png = vec![0x89, b'P', b'N', b'G', 1, 2, 3, 4];
    let (status, updated) = call(&app, upload("image/png", png.clone())?).await?;
    assert_eq!(status, StatusCode::OK);
    let url = updated["image_url"].as_str().unwrap_or_default().to_string();
    assert!(url.starts_with(&format!("/media/services/{sid}/")));
    assert!(url.ends_with(".png"));

    let resp = app.clone().oneshot(Request::builder().uri(&url).body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(to_bytes(resp.into_body(), usize::MAX).await?.to_vec(), png);

    let (status, replaced) = call(&app, upload("image/webp", vec![b'R', b'I', b'F', b'F'])?).await?;
    assert_eq!(status, StatusCode::OK);
    let new_url = replaced["image_url"].as_str().unwrap_or_default().to_string();
    assert_ne!(new_url, url);
    let old = app.clone().oneshot(Request::builder().uri(&url).body(Body::empty())?).await?;
    assert_eq!(old.status(), StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/services/{sid}"), Some(&owner_tok), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let gone = app.clone().oneshot(Request::builder().uri(&new_url).body(Body::empty())?).await?;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn metrics_endpoint_exposes_booking_counters() -> anyhow::Result<()> {
    server::observability::init_metrics();
    let app = build_app();
    let resp = app.clone().oneshot(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("autoease_bookings_created_total"));
    Ok(())
}
