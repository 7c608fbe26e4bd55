use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct OkResponseDoc { pub ok: bool }

#[derive(ToSchema)]
pub struct ErrorResponseDoc { pub error: String, pub field: Option<String> }

/// `username` is accepted as an alias of `login`.
#[derive(ToSchema)]
pub struct LoginRequest { pub login: String, pub password: String }

#[derive(ToSchema)]
pub struct EmployeeDoc {
    pub id: i32,
    pub full_name: String,
    pub position: String,
    /// `male` or `female`
    pub gender: String,
    pub phone: String,
    pub email: String,
    pub on_probation: bool,
    /// YYYY-MM-DD
    pub hire_date: String,
}

/// Full record; `fio` and `probation` are accepted as aliases.
#[derive(ToSchema)]
pub struct EmployeeInputDoc {
    pub full_name: String,
    pub position: String,
    pub gender: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub on_probation: Option<bool>,
    pub hire_date: String,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQueryDoc {
    /// Search term; empty means no filter
    pub search: Option<String>,
    /// full_name, position, phone, email, gender or on_probation
    pub field: Option<String>,
    /// Sort column (alias `sort_by`); unknown values sort by full_name
    pub sort: Option<String>,
    /// asc or desc
    pub order: Option<String>,
    pub offset: Option<String>,
    /// Capped at the configured maximum
    pub limit: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::employees::list,
        crate::routes::employees::get,
        crate::routes::employees::create,
        crate::routes::employees::update,
        crate::routes::employees::delete,
    ),
    components(
        schemas(
            HealthResponse,
            OkResponseDoc,
            ErrorResponseDoc,
            LoginRequest,
            EmployeeDoc,
            EmployeeInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "employees")
    )
)]
pub struct ApiDoc;
