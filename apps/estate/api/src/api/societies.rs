use domain_societies::{AmenityAggregator, GooglePlacesClient, PgSocietyRepository, SocietyService};

use crate::state::AppState;

pub fn service(state: &AppState) -> SocietyService<PgSocietyRepository, GooglePlacesClient> {
    let aggregator = AmenityAggregator::new(state.places.clone(), &state.config.places);
    SocietyService::new(
        PgSocietyRepository::new(state.db.clone()),
        aggregator,
        state.config.search,
    )
}
