use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_societies::SocietyError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Society '{society}' not found in {city}")]
    SocietyNotFound { city: String, society: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The model service answered 404 for these filters
    #[error("No data for the given filters: {0}")]
    NoData(String),

    #[error("Valuation service unavailable: {0}")]
    Upstream(String),

    #[error(transparent)]
    Society(#[from] SocietyError),
}

pub type ValuationResult<T> = Result<T, ValuationError>;

impl From<ValuationError> for AppError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::SocietyNotFound { .. } => {
                AppError::NotFound("Society not found in the specified city.".to_string())
            }
            ValuationError::InvalidInput(msg) => AppError::InvalidInput(msg),
            ValuationError::NoData(msg) => AppError::NotFound(msg),
            ValuationError::Upstream(msg) => AppError::UpstreamUnavailable(msg),
            ValuationError::Society(e) => e.into(),
        }
    }
}

impl IntoResponse for ValuationError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<reqwest::Error> for ValuationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ValuationError::Upstream("request timed out".to_string())
        } else if err.is_decode() {
            ValuationError::Upstream(format!("unexpected response: {err}"))
        } else {
            ValuationError::Upstream(err.to_string())
        }
    }
}
