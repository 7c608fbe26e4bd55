use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Extension, Form};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info};

use service::auth::domain::LoginInput;
use service::auth::errors::AuthError;
use service::auth::SessionEntry;
use service::directory::{EmployeeInput, ListParams};
use service::errors::ServiceError;

use super::auth::{end_session, session_cookie, ServerState};
use crate::views;

fn message_page(status: StatusCode, message: &str, user: Option<&str>) -> Response {
    let body = format!("<p>{}</p><p><a href=\"/\">Back to the list</a></p>", views::escape(message));
    (status, Html(views::layout(message, user, &body))).into_response()
}

/// Non-form failures: missing rows and storage errors.
fn failure_page(err: ServiceError, user: Option<&str>) -> Response {
    match err {
        ServiceError::NotFound(msg) => message_page(StatusCode::NOT_FOUND, &msg, user),
        ServiceError::Validation { message, .. } => message_page(StatusCode::BAD_REQUEST, &message, user),
        ServiceError::Db(msg) => {
            error!(err = %msg, "storage failure");
            message_page(StatusCode::INTERNAL_SERVER_ERROR, "internal error", user)
        }
    }
}

fn parse_id(raw: &str) -> Result<i32, ServiceError> {
    raw.trim().parse::<i32>().map_err(|_| ServiceError::not_found("employee"))
}

pub async fn index(
    State(state): State<ServerState>,
    headers: HeaderMap,
    jar: CookieJar,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let session = state.session(&headers, &jar);
    let user = session.as_ref().map(|s| s.user.username.as_str());
    let params = params.map(|Query(p)| p).unwrap_or_default();
    match state.employees.list(&params).await {
        Ok(page) => Html(views::employee_list(&page, &params, user)).into_response(),
        Err(e) => failure_page(e, user),
    }
}

pub async fn login_page() -> Html<String> { Html(views::login_form(None)) }

pub async fn login_submit(
    State(state): State<ServerState>,
    jar: CookieJar,
    form: Result<Form<LoginInput>, FormRejection>,
) -> Response {
    let Ok(Form(input)) = form else {
        return (StatusCode::BAD_REQUEST, Html(views::login_form(Some("login and password are required")))).into_response();
    };
    match state.auth.login(input).await {
        Ok(session) => (jar.add(session_cookie(session.token, state.secure_cookies)), Redirect::to("/")).into_response(),
        Err(AuthError::Unauthorized) => {
            (StatusCode::UNAUTHORIZED, Html(views::login_form(Some("invalid credentials")))).into_response()
        }
        Err(e) => {
            error!(code = e.code(), err = %e, "page login failed");
            message_page(StatusCode::INTERNAL_SERVER_ERROR, "internal error", None)
        }
    }
}

pub async fn logout(State(state): State<ServerState>, headers: HeaderMap, jar: CookieJar) -> (CookieJar, Redirect) {
    (end_session(&state, &headers, jar), Redirect::to("/"))
}

fn rerender(title: &str, action: &str, input: &EmployeeInput, err: ServiceError, user: &str) -> Response {
    match err {
        ServiceError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            Html(views::employee_form(title, action, input, Some((field.as_str(), message.as_str())), Some(user))),
        )
            .into_response(),
        other => failure_page(other, Some(user)),
    }
}

pub async fn new_form(Extension(session): Extension<SessionEntry>) -> Html<String> {
    Html(views::employee_form("New employee", "/employee/new", &EmployeeInput::default(), None, Some(&session.user.username)))
}

pub async fn new_submit(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    form: Result<Form<EmployeeInput>, FormRejection>,
) -> Response {
    let user = session.user.username.as_str();
    let Ok(Form(input)) = form else {
        return rerender("New employee", "/employee/new", &EmployeeInput::default(), ServiceError::validation("form", "malformed form"), user);
    };
    match state.employees.create(input.clone()).await {
        Ok(created) => {
            info!(employee_id = created.id, by = session.user.id, "page_employee_created");
            Redirect::to("/").into_response()
        }
        Err(e) => rerender("New employee", "/employee/new", &input, e, user),
    }
}

pub async fn edit_form(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    Path(id): Path<String>,
) -> Response {
    let user = session.user.username.as_str();
    let found = match parse_id(&id) {
        Ok(id) => state.employees.get(id).await,
        Err(e) => Err(e),
    };
    match found {
        Ok(m) => {
            let action = format!("/employee/{}/edit", m.id);
            Html(views::employee_form("Edit employee", &action, &EmployeeInput::from(&m), None, Some(user))).into_response()
        }
        Err(e) => failure_page(e, Some(user)),
    }
}

pub async fn edit_submit(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    Path(id): Path<String>,
    form: Result<Form<EmployeeInput>, FormRejection>,
) -> Response {
    let user = session.user.username.as_str();
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return failure_page(e, Some(user)),
    };
    let action = format!("/employee/{id}/edit");
    let Ok(Form(input)) = form else {
        return rerender("Edit employee", &action, &EmployeeInput::default(), ServiceError::validation("form", "malformed form"), user);
    };
    match state.employees.update(id, input.clone()).await {
        Ok(_) => {
            info!(employee_id = id, by = session.user.id, "page_employee_updated");
            Redirect::to("/").into_response()
        }
        Err(e) => rerender("Edit employee", &action, &input, e, user),
    }
}

pub async fn delete_submit(
    State(state): State<ServerState>,
    Extension(session): Extension<SessionEntry>,
    Path(id): Path<String>,
) -> Response {
    let user = session.user.username.as_str();
    let result = match parse_id(&id) {
        Ok(id) => state.employees.delete(id).await.map(|_| id),
        Err(e) => Err(e),
    };
    match result {
        Ok(id) => {
            info!(employee_id = id, by = session.user.id, "page_employee_deleted");
            Redirect::to("/").into_response()
        }
        Err(e) => failure_page(e, Some(user)),
    }
}
