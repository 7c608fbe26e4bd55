pub mod auth;
pub mod employees;
pub mod pages;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: JSON API, page routes and the OpenAPI document.
/// Mutating routes carry the session gate as a route layer, so it runs before
/// any body is extracted.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api_gate = middleware::from_fn_with_state(state.clone(), auth::require_session);
    let page_gate = middleware::from_fn_with_state(state.clone(), auth::require_session_page);

    let api = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route(
            "/api/employees",
            get(employees::list).merge(post(employees::create).route_layer(api_gate.clone())),
        )
        .route(
            "/api/employees/:id",
            get(employees::get).merge(
                axum::routing::put(employees::update)
                    .delete(employees::delete)
                    .route_layer(api_gate),
            ),
        );

    let pages = Router::new()
        .route("/", get(pages::index))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        // POST only; a cross-site GET must not end the session
        .route("/logout", post(pages::logout))
        .merge(
            Router::new()
                .route("/employee/new", get(pages::new_form).post(pages::new_submit))
                .route("/employee/:id/edit", get(pages::edit_form).post(pages::edit_submit))
                .route("/employee/:id/delete", post(pages::delete_submit))
                .route_layer(page_gate),
        );

    api.merge(pages)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
