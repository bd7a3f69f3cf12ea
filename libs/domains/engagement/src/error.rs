use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_societies::SocietyError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EngagementError {
    #[error("Society not found: {0}")]
    SocietyNotFound(Uuid),

    #[error("Token subject is not a user id: {0}")]
    UnknownCaller(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type EngagementResult<T> = Result<T, EngagementError>;

impl From<DbErr> for EngagementError {
    fn from(err: DbErr) -> Self {
        EngagementError::Database(err)
    }
}

impl From<SocietyError> for EngagementError {
    fn from(err: SocietyError) -> Self {
        match err {
            SocietyError::NotFound(id) => EngagementError::SocietyNotFound(id),
            SocietyError::Database(e) => EngagementError::Database(e),
            SocietyError::InvalidInput(msg) => EngagementError::InvalidInput(msg),
            SocietyError::Duplicate { name, city } => {
                EngagementError::InvalidInput(format!("Society '{name}' already exists in {city}"))
            }
        }
    }
}

impl From<EngagementError> for AppError {
    fn from(err: EngagementError) -> Self {
        match err {
            EngagementError::SocietyNotFound(_) => {
                AppError::NotFound("Society not found.".to_string())
            }
            EngagementError::UnknownCaller(_) => {
                AppError::Unauthorized("Invalid token".to_string())
            }
            EngagementError::InvalidInput(msg) => AppError::InvalidInput(msg),
            EngagementError::Database(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for EngagementError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
