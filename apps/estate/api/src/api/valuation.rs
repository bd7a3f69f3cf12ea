use domain_societies::PgSocietyRepository;
use domain_valuation::{HttpValuationClient, ValuationService};

use crate::state::AppState;

/// Society lookups share the pool with the societies domain
pub fn service(state: &AppState) -> ValuationService<HttpValuationClient, PgSocietyRepository> {
    ValuationService::new(
        state.valuation.clone(),
        PgSocietyRepository::new(state.db.clone()),
    )
}
