use domain_cost_estimation::{CostEstimationService, CostEstimator, PgReferenceDataRepository};

use crate::state::AppState;

pub fn service(state: &AppState) -> CostEstimationService<PgReferenceDataRepository> {
    CostEstimationService::new(
        PgReferenceDataRepository::new(state.db.clone()),
        CostEstimator::new(state.config.estimator),
    )
}
