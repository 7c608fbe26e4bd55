#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::Service;

use configs::AppConfig;

pub const ADMIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Adm1nPass";

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database.url = "sqlite::memory:".into();
    cfg.auth.session_secret = "test-secret-test-secret-test-secret".into();
    cfg.auth.bootstrap_username = Some(ADMIN.into());
    cfg.auth.bootstrap_password = Some(ADMIN_PASSWORD.into());
    cfg
}

/// Fresh in-memory database, migrated, with the bootstrap account in place.
pub async fn build_app() -> anyhow::Result<Router> {
    let cfg = test_config();
    let db = models::db::connect_with_config(&cfg.database).await?;
    let (state, app) = server::startup::build_app(db.clone(), &cfg);
    server::startup::prepare(&db, &state, &cfg).await?;
    Ok(app)
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().call(req).await.unwrap()
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn form_request(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap().to_vec()
}

pub async fn body_json(resp: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

pub async fn body_text(resp: Response<Body>) -> String {
    String::from_utf8(body_bytes(resp).await).unwrap()
}

/// `auth_token=<value>` taken from a Set-Cookie header.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|kv| kv.starts_with("auth_token=") && kv.len() > "auth_token=".len())
        .map(str::to_string)
}

pub async fn login(app: &Router) -> String {
    let req = json_request("POST", "/api/login", None, Some(serde_json::json!({"login": ADMIN, "password": ADMIN_PASSWORD})));
    let resp = send(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    session_cookie(&resp).expect("login sets the session cookie")
}

pub fn employee(name: &str, position: &str, gender: &str, probation: bool, hired: &str) -> Value {
    serde_json::json!({
        "full_name": name,
        "position": position,
        "gender": gender,
        "phone": "+7 900 000-00-00",
        "email": "",
        "on_probation": probation,
        "hire_date": hired,
    })
}

pub async fn create(app: &Router, cookie: &str, body: Value) -> Value {
    let resp = send(app, json_request("POST", "/api/employees", Some(cookie), Some(body))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}
