use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Tier;

#[derive(Debug, Error)]
pub enum CostError {
    #[error("Invalid area: {0}")]
    InvalidArea(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No {tier} rate for '{material}'")]
    MissingTierRate { material: String, tier: Tier },

    #[error("No quantity per area for '{material}'")]
    MissingQuantity { material: String, tier: Tier },

    #[error("{table} entry not found: {id}")]
    NotFound { table: &'static str, id: Uuid },

    #[error("Reference data unavailable: {0}")]
    ReferenceDataUnavailable(#[from] sea_orm::DbErr),
}

pub type CostResult<T> = Result<T, CostError>;

impl CostError {
    /// Label for `cost_estimates_total{outcome}`
    pub fn outcome(&self) -> &'static str {
        match self {
            CostError::InvalidArea(_) | CostError::InvalidInput(_) => "invalid",
            CostError::MissingTierRate { .. } | CostError::MissingQuantity { .. } => {
                "missing_rate"
            }
            CostError::NotFound { .. } => "not_found",
            CostError::ReferenceDataUnavailable(_) => "store_error",
        }
    }
}

impl From<CostError> for AppError {
    fn from(err: CostError) -> Self {
        match err {
            CostError::InvalidArea(msg) => AppError::InvalidInput(format!("Invalid area: {msg}")),
            CostError::InvalidInput(msg) => AppError::InvalidInput(msg),
            CostError::MissingTierRate { material, tier }
            | CostError::MissingQuantity { material, tier } => AppError::MissingTierRate {
                item: material,
                tier: tier.to_string(),
            },
            CostError::NotFound { table, id } => {
                AppError::NotFound(format!("{table} entry {id} not found"))
            }
            CostError::ReferenceDataUnavailable(e) => AppError::Store(e),
        }
    }
}

impl IntoResponse for CostError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::ErrorCode;

    #[test]
    fn test_missing_quantity_shares_the_missing_rate_kind() {
        let err: AppError = CostError::MissingQuantity {
            material: "Marble".to_string(),
            tier: Tier::High,
        }
        .into();

        assert_eq!(err.error_code(), ErrorCode::MissingTierRate);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_store_errors_are_store_unavailable() {
        let err: AppError =
            CostError::ReferenceDataUnavailable(sea_orm::DbErr::Custom("down".into())).into();
        assert_eq!(err.error_code(), ErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_invalid_area_is_bad_request() {
        let err: AppError = CostError::InvalidArea("must be positive".into()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
