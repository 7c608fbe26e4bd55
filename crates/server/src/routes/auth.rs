use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sea_orm::DatabaseConnection;
use tracing::warn;

use common::types::OkResponse;
use configs::AppConfig;
use service::auth::domain::LoginInput;
use service::auth::repo::SeaOrmAuthRepository;
use service::auth::{AuthService, SessionEntry, SessionStore};
use service::directory::{EmployeeService, QueryPolicy, SeaOrmEmployeeRepository};

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub employees: Arc<EmployeeService<SeaOrmEmployeeRepository>>,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub secure_cookies: bool,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let ttl = chrono::Duration::hours(i64::from(cfg.auth.session_ttl_hours));
        let sessions = Arc::new(SessionStore::new(&cfg.auth.session_secret, ttl));
        let employees = EmployeeService::new(
            Arc::new(SeaOrmEmployeeRepository::new(db.clone())),
            QueryPolicy::from(&cfg.directory),
        );
        let auth = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db)), sessions);
        Self { employees: Arc::new(employees), auth: Arc::new(auth), secure_cookies: cfg.server.secure_cookies }
    }

    /// Live session presented by the request, if any.
    pub fn session(&self, headers: &HeaderMap, jar: &CookieJar) -> Option<SessionEntry> {
        presented_token(headers, jar).and_then(|t| self.auth.authenticate(&t))
    }
}

/// `Authorization: Bearer` wins over the cookie.
pub fn presented_token(headers: &HeaderMap, jar: &CookieJar) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    bearer.or_else(|| jar.get(AUTH_COOKIE).map(|c| c.value().to_string()).filter(|t| !t.is_empty()))
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let mut cookie = Cookie::from(AUTH_COOKIE);
    cookie.set_path("/");
    jar.remove(cookie)
}

/// Shared by the JSON and page logout routes.
pub fn end_session(state: &ServerState, headers: &HeaderMap, jar: CookieJar) -> CookieJar {
    state.auth.logout(presented_token(headers, &jar).as_deref());
    clear_session_cookie(jar)
}

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in, session cookie set"), (status = 400, description = "Malformed body"), (status = 401, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    body: Result<Json<LoginInput>, JsonRejection>,
) -> Result<(CookieJar, Json<OkResponse>), JsonApiError> {
    let Json(input) = body?;
    let session = state.auth.login(input).await?;
    let jar = jar.add(session_cookie(session.token, state.secure_cookies));
    Ok((jar, Json(OkResponse::default())))
}

#[utoipa::path(post, path = "/api/logout", tag = "auth", responses((status = 200, description = "Session ended (idempotent)")))]
pub async fn logout(State(state): State<ServerState>, headers: HeaderMap, jar: CookieJar) -> (CookieJar, Json<OkResponse>) {
    (end_session(&state, &headers, jar), Json(OkResponse::default()))
}

/// Gate for mutating JSON routes: 403 unless a live session is presented.
/// The resolved `SessionEntry` is passed on as a request extension.
pub async fn require_session(
    State(state): State<ServerState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    match state.session(req.headers(), &jar) {
        Some(entry) => {
            req.extensions_mut().insert(entry);
            Ok(next.run(req).await)
        }
        None => {
            warn!(method = %req.method(), path = %req.uri().path(), "session required");
            Err(JsonApiError::NotAuthorized)
        }
    }
}

/// Page variant of [`require_session`]: anonymous visitors go to the login form.
pub async fn require_session_page(State(state): State<ServerState>, jar: CookieJar, mut req: Request, next: Next) -> Response {
    match state.session(req.headers(), &jar) {
        Some(entry) => {
            req.extensions_mut().insert(entry);
            next.run(req).await
        }
        None => Redirect::to("/login").into_response(),
    }
}
