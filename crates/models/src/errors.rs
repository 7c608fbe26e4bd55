use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}
