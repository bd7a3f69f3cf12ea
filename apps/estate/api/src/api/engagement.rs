use domain_engagement::{EngagementService, PgReviewRepository, PgSearchHistoryRepository};
use domain_societies::PgSocietyRepository;

use crate::state::AppState;

pub fn service(
    state: &AppState,
) -> EngagementService<PgReviewRepository, PgSearchHistoryRepository, PgSocietyRepository> {
    EngagementService::new(
        PgReviewRepository::new(state.db.clone()),
        PgSearchHistoryRepository::new(state.db.clone()),
        PgSocietyRepository::new(state.db.clone()),
    )
}
