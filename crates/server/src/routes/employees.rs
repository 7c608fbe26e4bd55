use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderName, StatusCode};
use axum::{Extension, Json};
use tracing::info;

use models::employee;
use service::auth::SessionEntry;
use service::directory::{EmployeeInput, ListParams};

use super::auth::ServerState;
use crate::errors::JsonApiError;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Ids that are not integers cannot name a row.
pub fn parse_id(raw: &str) -> Result<i32, JsonApiError> {
    raw.trim().parse::<i32>().map_err(|_| JsonApiError::employee_not_found())
}

#[utoipa::path(get, path = "/api/employees", tag = "employees", params(crate::openapi::ListQueryDoc), responses((status = 200, description = "One window of matching employees; total in X-Total-Count", body = [crate::openapi::EmployeeDoc])))]
pub async fn list(
    State(state): State<ServerState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<([(HeaderName, String); 1], Json<Vec<employee::Model>>), JsonApiError> {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let page = state.employees.list(&params).await?;
    Ok(([(HeaderName::from_static(TOTAL_COUNT_HEADER), page.total.to_string())], Json(page.items)))
}

#[utoipa::path(get, path = "/api/employees/{id}", tag = "employees", params(("id" = i32, Path, description = "Employee id")), responses((status = 200, body = crate::openapi::EmployeeDoc), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<employee::Model>, JsonApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.employees.get(id).await?))
}

#[utoipa::path(post, path = "/api/employees", tag = "employees", request_body = crate::openapi::EmployeeInputDoc, responses((status = 201, body = crate::openapi::EmployeeDoc), (status = 400, description = "Validation failed"), (status = 403, description = "No session")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<employee::Model>), JsonApiError> {
    let Json(input) = body?;
    let created = state.employees.create(input).await?;
    info!(employee_id = created.id, by = session.user.id, "api_employee_created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(put, path = "/api/employees/{id}", tag = "employees", params(("id" = i32, Path, description = "Employee id")), request_body = crate::openapi::EmployeeInputDoc, responses((status = 200, body = crate::openapi::EmployeeDoc), (status = 400, description = "Validation failed"), (status = 403, description = "No session"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    Path(id): Path<String>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> Result<Json<employee::Model>, JsonApiError> {
    let id = parse_id(&id)?;
    let Json(input) = body?;
    let updated = state.employees.update(id, input).await?;
    info!(employee_id = id, by = session.user.id, "api_employee_updated");
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/api/employees/{id}", tag = "employees", params(("id" = i32, Path, description = "Employee id")), responses((status = 204, description = "Deleted"), (status = 403, description = "No session"), (status = 404, description = "Not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&id)?;
    state.employees.delete(id).await?;
    info!(employee_id = id, by = session.user.id, "api_employee_deleted");
    Ok(StatusCode::NO_CONTENT)
}
