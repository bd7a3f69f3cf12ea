use domain_societies::{Society, SocietyRepository};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EngagementError, EngagementResult};
use crate::models::{
    Author, ClearedHistory, CreateReview, RecordSearch, SearchHistory, SearchRecord, SiteReview,
    SocietyReview, Trend, TrendReport, TrendingQuery, TrendingSociety,
};
use crate::repository::{ReviewRepository, SearchHistoryRepository};
use crate::trends::{SIMILAR_LIMIT, TRENDING_LIMIT, nearest_societies, rank_by_reviews};

/// Reviews, search history and trends over the society directory
#[derive(Clone)]
pub struct EngagementService<R, H, S>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    reviews: Arc<R>,
    history: Arc<H>,
    societies: Arc<S>,
}

fn validate(input: &impl Validate) -> EngagementResult<()> {
    input
        .validate()
        .map_err(|e| EngagementError::InvalidInput(e.to_string()))
}

impl<R, H, S> EngagementService<R, H, S>
where
    R: ReviewRepository,
    H: SearchHistoryRepository,
    S: SocietyRepository,
{
    pub fn new(reviews: R, history: H, societies: S) -> Self {
        Self {
            reviews: Arc::new(reviews),
            history: Arc::new(history),
            societies: Arc::new(societies),
        }
    }

    async fn society(&self, id: Uuid) -> EngagementResult<Society> {
        self.societies
            .get_by_id(id)
            .await?
            .ok_or(EngagementError::SocietyNotFound(id))
    }

    pub async fn review_society(
        &self,
        society_id: Uuid,
        author: Author,
        input: CreateReview,
    ) -> EngagementResult<SocietyReview> {
        validate(&input)?;
        self.society(society_id).await?;

        let review = self
            .reviews
            .create_society_review(SocietyReview::new(society_id, author, input))
            .await?;
        tracing::info!(
            society_id = %society_id,
            user_id = %review.user_id,
            rating = review.rating,
            "Society review submitted"
        );
        Ok(review)
    }

    /// Newest first; unknown societies are `SocietyNotFound`
    pub async fn society_reviews(&self, society_id: Uuid) -> EngagementResult<Vec<SocietyReview>> {
        self.society(society_id).await?;
        self.reviews.society_reviews(society_id).await
    }

    /// Most reviewed societies in one city
    pub async fn top_trending(&self, query: TrendingQuery) -> EngagementResult<Vec<TrendingSociety>> {
        validate(&query)?;
        let city = query.city.trim();
        if city.is_empty() {
            return Err(EngagementError::InvalidInput(
                "City is required to fetch top trending societies.".to_string(),
            ));
        }

        let societies = self.societies.list(Some(city.to_string())).await?;
        let ids: Vec<Uuid> = societies.iter().map(|s| s.id).collect();
        let counts = self.reviews.review_counts(&ids).await?;
        Ok(rank_by_reviews(societies, &counts, TRENDING_LIMIT))
    }

    pub async fn review_site(
        &self,
        author: Author,
        input: CreateReview,
    ) -> EngagementResult<SiteReview> {
        validate(&input)?;
        let review = self
            .reviews
            .create_site_review(SiteReview::new(author, input))
            .await?;
        tracing::info!(user_id = %review.user_id, rating = review.rating, "Site review submitted");
        Ok(review)
    }

    pub async fn site_reviews(&self) -> EngagementResult<Vec<SiteReview>> {
        self.reviews.site_reviews().await
    }

    pub async fn record_search(
        &self,
        author: Author,
        input: RecordSearch,
    ) -> EngagementResult<SearchRecord> {
        let society = self.society(input.society_id).await?;
        let record = self
            .history
            .record(SearchRecord::new(author, &society))
            .await?;
        tracing::debug!(
            society_id = %record.society_id,
            user_id = %record.user_id,
            "Search recorded"
        );
        Ok(record)
    }

    pub async fn search_history(&self, user_id: Uuid) -> EngagementResult<SearchHistory> {
        Ok(SearchHistory {
            searches: self.history.history(user_id).await?,
        })
    }

    /// Only the caller's own records are removed
    pub async fn clear_history(&self, user_id: Uuid) -> EngagementResult<ClearedHistory> {
        let deleted = self.history.delete_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, deleted, "Search history cleared");
        Ok(ClearedHistory { deleted })
    }

    pub async fn trends(&self, society_id: Uuid) -> EngagementResult<TrendReport> {
        let society = self.society(society_id).await?;
        let search_count = self.history.search_count(society_id).await?;
        let searched_at = self.history.searched_at(society_id).await?;
        let candidates = self.societies.list_with_coordinates().await?;

        Ok(TrendReport {
            society_id,
            trend: Trend::classify(search_count),
            search_count,
            searched_at,
            similar_societies: nearest_societies(&society, candidates, SIMILAR_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        InMemoryReviewRepository, InMemorySearchHistoryRepository, MockReviewRepository,
        MockSearchHistoryRepository,
    };
    use domain_societies::{CreateSociety, InMemorySocietyRepository};
    use std::collections::HashMap;

    type Service = EngagementService<
        InMemoryReviewRepository,
        InMemorySearchHistoryRepository,
        InMemorySocietyRepository,
    >;

    fn author(name: &str) -> Author {
        Author {
            id: Uuid::now_v7(),
            name: name.to_string(),
        }
    }

    fn rating(rating: i32) -> CreateReview {
        CreateReview {
            rating,
            comment: Some("Quiet streets".to_string()),
        }
    }

    async fn add_society(
        repo: &InMemorySocietyRepository,
        name: &str,
        city: &str,
        coords: Option<(f64, f64)>,
    ) -> Society {
        repo.create(Society::new(CreateSociety {
            name: name.to_string(),
            city: city.to_string(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
        }))
        .await
        .unwrap()
    }

    async fn service() -> (Service, InMemorySocietyRepository) {
        let societies = InMemorySocietyRepository::new();
        let service = EngagementService::new(
            InMemoryReviewRepository::new(),
            InMemorySearchHistoryRepository::new(),
            societies.clone(),
        );
        (service, societies)
    }

    #[tokio::test]
    async fn test_review_unknown_society_is_not_found() {
        let reviews = MockReviewRepository::new();
        // No expectations: nothing may be stored
        let service = EngagementService::new(
            reviews,
            MockSearchHistoryRepository::new(),
            InMemorySocietyRepository::new(),
        );

        let err = service
            .review_society(Uuid::now_v7(), author("Ali"), rating(4))
            .await
            .unwrap_err();
        assert!(matches!(err, EngagementError::SocietyNotFound(_)));
    }

    #[tokio::test]
    async fn test_out_of_range_rating_is_rejected_before_lookup() {
        let (service, societies) = service().await;
        let society = add_society(&societies, "DHA Phase 2", "Islamabad", None).await;

        let err = service
            .review_society(society.id, author("Ali"), rating(6))
            .await
            .unwrap_err();
        assert!(matches!(err, EngagementError::InvalidInput(msg) if msg.contains("between 1 and 5")));
        assert!(service.society_reviews(society.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_review_is_stored_under_author() {
        let (service, societies) = service().await;
        let society = add_society(&societies, "DHA Phase 2", "Islamabad", None).await;
        let ali = author("Ali");

        let review = service
            .review_society(society.id, ali.clone(), rating(5))
            .await
            .unwrap();
        assert_eq!(review.user_id, ali.id);
        assert_eq!(review.user_name, "Ali");

        let listed = service.society_reviews(society.id).await.unwrap();
        assert_eq!(listed, vec![review]);
    }

    #[tokio::test]
    async fn test_top_trending_is_city_scoped() {
        let (service, societies) = service().await;
        let dha = add_society(&societies, "DHA Phase 2", "Islamabad", None).await;
        let bahria = add_society(&societies, "Bahria Town", "Islamabad", None).await;
        let lahore = add_society(&societies, "DHA Phase 5", "Lahore", None).await;

        for _ in 0..2 {
            service.review_society(bahria.id, author("Ali"), rating(4)).await.unwrap();
        }
        service.review_society(dha.id, author("Sara"), rating(3)).await.unwrap();
        for _ in 0..5 {
            service.review_society(lahore.id, author("Omar"), rating(5)).await.unwrap();
        }

        let top = service
            .top_trending(TrendingQuery {
                city: "Islamabad".to_string(),
            })
            .await
            .unwrap();
        let ranked: Vec<_> = top
            .iter()
            .map(|t| (t.society.name.as_str(), t.review_count))
            .collect();
        assert_eq!(ranked, vec![("Bahria Town", 2), ("DHA Phase 2", 1)]);
    }

    #[tokio::test]
    async fn test_top_trending_needs_city() {
        let (service, _) = service().await;
        let err = service
            .top_trending(TrendingQuery {
                city: "  ".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EngagementError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_top_trending_asks_for_city_societies_only() {
        let societies = InMemorySocietyRepository::new();
        let dha = add_society(&societies, "DHA Phase 2", "Islamabad", None).await;
        add_society(&societies, "DHA Phase 5", "Lahore", None).await;

        let mut reviews = MockReviewRepository::new();
        let expected = dha.id;
        reviews
            .expect_review_counts()
            .withf(move |ids| ids.to_vec() == vec![expected])
            .times(1)
            .returning(move |_| Ok(HashMap::from([(expected, 7)])));
        let service =
            EngagementService::new(reviews, MockSearchHistoryRepository::new(), societies);

        let top = service
            .top_trending(TrendingQuery {
                city: "Islamabad".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(top[0].review_count, 7);
    }

    #[tokio::test]
    async fn test_history_and_clear_are_per_user() {
        let (service, societies) = service().await;
        let society = add_society(&societies, "Gulberg Greens", "Islamabad", None).await;
        let (ali, sara) = (author("Ali"), author("Sara"));

        service
            .record_search(ali.clone(), RecordSearch { society_id: society.id })
            .await
            .unwrap();
        service
            .record_search(sara.clone(), RecordSearch { society_id: society.id })
            .await
            .unwrap();

        let history = service.search_history(ali.id).await.unwrap();
        assert_eq!(history.searches.len(), 1);
        assert_eq!(history.searches[0].society_name, "Gulberg Greens");
        assert_eq!(history.searches[0].city_name, "Islamabad");

        assert_eq!(service.clear_history(ali.id).await.unwrap().deleted, 1);
        assert!(service.search_history(ali.id).await.unwrap().searches.is_empty());
        assert_eq!(service.search_history(sara.id).await.unwrap().searches.len(), 1);
    }

    #[tokio::test]
    async fn test_record_unknown_society_is_not_found() {
        let (service, _) = service().await;
        let err = service
            .record_search(author("Ali"), RecordSearch { society_id: Uuid::now_v7() })
            .await
            .unwrap_err();
        assert!(matches!(err, EngagementError::SocietyNotFound(_)));
    }

    #[tokio::test]
    async fn test_trends_count_searches_and_list_neighbours() {
        let (service, societies) = service().await;
        let target = add_society(&societies, "DHA Phase 2", "Islamabad", Some((33.53, 73.15))).await;
        add_society(&societies, "DHA Valley", "Islamabad", Some((33.45, 73.22))).await;
        add_society(&societies, "No Pin", "Islamabad", None).await;

        for _ in 0..3 {
            service
                .record_search(author("Ali"), RecordSearch { society_id: target.id })
                .await
                .unwrap();
        }

        let report = service.trends(target.id).await.unwrap();
        assert_eq!(report.search_count, 3);
        assert_eq!(report.trend, Trend::Declining);
        assert_eq!(report.searched_at.len(), 3);
        assert!(report.searched_at.windows(2).all(|w| w[0] <= w[1]));
        let names: Vec<_> = report
            .similar_societies
            .iter()
            .map(|s| s.society.name.as_str())
            .collect();
        assert_eq!(names, vec!["DHA Valley"]);
    }

    #[tokio::test]
    async fn test_trends_for_unknown_society_is_not_found() {
        let (service, _) = service().await;
        let err = service.trends(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, EngagementError::SocietyNotFound(_)));
    }
}
