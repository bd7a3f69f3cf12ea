use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SocietyError {
    #[error("Society not found: {0}")]
    NotFound(Uuid),

    #[error("Society '{name}' already exists in {city}")]
    Duplicate { name: String, city: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type SocietyResult<T> = Result<T, SocietyError>;

impl SocietyError {
    /// Maps a write error, turning unique violations on (city, name) into `Duplicate`
    pub fn from_write(err: DbErr, name: &str, city: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => SocietyError::Duplicate {
                name: name.to_string(),
                city: city.to_string(),
            },
            _ => SocietyError::Database(err),
        }
    }
}

impl From<DbErr> for SocietyError {
    fn from(err: DbErr) -> Self {
        SocietyError::Database(err)
    }
}

impl From<SocietyError> for AppError {
    fn from(err: SocietyError) -> Self {
        match err {
            SocietyError::NotFound(id) => AppError::NotFound(format!("Society {id} not found")),
            SocietyError::Duplicate { .. } => AppError::Conflict(
                "Society with this name and city already exists.".to_string(),
            ),
            SocietyError::InvalidInput(msg) => AppError::InvalidInput(msg),
            SocietyError::Database(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for SocietyError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
