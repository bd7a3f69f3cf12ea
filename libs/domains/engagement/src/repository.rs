use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::EngagementResult;
use crate::models::{SearchRecord, SiteReview, SocietyReview};

/// Storage for society and site reviews
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create_society_review(&self, review: SocietyReview) -> EngagementResult<SocietyReview>;

    /// Newest first
    async fn society_reviews(&self, society_id: Uuid) -> EngagementResult<Vec<SocietyReview>>;

    /// Review count per society; societies without reviews are absent
    async fn review_counts(&self, society_ids: &[Uuid]) -> EngagementResult<HashMap<Uuid, u64>>;

    async fn create_site_review(&self, review: SiteReview) -> EngagementResult<SiteReview>;

    /// Newest first
    async fn site_reviews(&self) -> EngagementResult<Vec<SiteReview>>;
}

/// Storage for the societies users looked at
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchHistoryRepository: Send + Sync {
    async fn record(&self, record: SearchRecord) -> EngagementResult<SearchRecord>;

    /// One user's records, newest first
    async fn history(&self, user_id: Uuid) -> EngagementResult<Vec<SearchRecord>>;

    /// Returns how many records were removed
    async fn delete_for_user(&self, user_id: Uuid) -> EngagementResult<u64>;

    async fn search_count(&self, society_id: Uuid) -> EngagementResult<u64>;

    /// Record times for one society, oldest first
    async fn searched_at(&self, society_id: Uuid) -> EngagementResult<Vec<DateTime<Utc>>>;
}

/// In-memory implementation for tests and local runs
#[derive(Clone, Default)]
pub struct InMemoryReviewRepository {
    society_reviews: Arc<RwLock<Vec<SocietyReview>>>,
    site_reviews: Arc<RwLock<Vec<SiteReview>>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create_society_review(&self, review: SocietyReview) -> EngagementResult<SocietyReview> {
        self.society_reviews.write().await.push(review.clone());
        Ok(review)
    }

    async fn society_reviews(&self, society_id: Uuid) -> EngagementResult<Vec<SocietyReview>> {
        let reviews = self.society_reviews.read().await;
        Ok(reviews
            .iter()
            .rev()
            .filter(|r| r.society_id == society_id)
            .cloned()
            .collect())
    }

    async fn review_counts(&self, society_ids: &[Uuid]) -> EngagementResult<HashMap<Uuid, u64>> {
        let reviews = self.society_reviews.read().await;
        let mut counts = HashMap::new();
        for review in reviews.iter().filter(|r| society_ids.contains(&r.society_id)) {
            *counts.entry(review.society_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn create_site_review(&self, review: SiteReview) -> EngagementResult<SiteReview> {
        self.site_reviews.write().await.push(review.clone());
        Ok(review)
    }

    async fn site_reviews(&self) -> EngagementResult<Vec<SiteReview>> {
        Ok(self.site_reviews.read().await.iter().rev().cloned().collect())
    }
}

/// In-memory implementation for tests and local runs
#[derive(Clone, Default)]
pub struct InMemorySearchHistoryRepository {
    records: Arc<RwLock<Vec<SearchRecord>>>,
}

impl InMemorySearchHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchHistoryRepository for InMemorySearchHistoryRepository {
    async fn record(&self, record: SearchRecord) -> EngagementResult<SearchRecord> {
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn history(&self, user_id: Uuid) -> EngagementResult<Vec<SearchRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_for_user(&self, user_id: Uuid) -> EngagementResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.user_id != user_id);
        Ok((before - records.len()) as u64)
    }

    async fn search_count(&self, society_id: Uuid) -> EngagementResult<u64> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.society_id == society_id).count() as u64)
    }

    async fn searched_at(&self, society_id: Uuid) -> EngagementResult<Vec<DateTime<Utc>>> {
        let records = self.records.read().await;
        let mut times: Vec<_> = records
            .iter()
            .filter(|r| r.society_id == society_id)
            .map(|r| r.created_at)
            .collect();
        times.sort();
        Ok(times)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, CreateReview};

    fn author(name: &str) -> Author {
        Author {
            id: Uuid::now_v7(),
            name: name.to_string(),
        }
    }

    fn review(rating: i32) -> CreateReview {
        CreateReview {
            rating,
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_society_reviews_newest_first() {
        let repo = InMemoryReviewRepository::new();
        let society = Uuid::now_v7();
        let other = Uuid::now_v7();
        for rating in [2, 4] {
            repo.create_society_review(SocietyReview::new(society, author("Ali"), review(rating)))
                .await
                .unwrap();
        }
        repo.create_society_review(SocietyReview::new(other, author("Sara"), review(5)))
            .await
            .unwrap();

        let ratings: Vec<_> = repo
            .society_reviews(society)
            .await
            .unwrap()
            .iter()
            .map(|r| r.rating)
            .collect();
        assert_eq!(ratings, vec![4, 2]);

        let counts = repo.review_counts(&[society]).await.unwrap();
        assert_eq!(counts.get(&society), Some(&2));
        assert!(!counts.contains_key(&other));
    }

    #[tokio::test]
    async fn test_delete_for_user_leaves_other_users() {
        let repo = InMemorySearchHistoryRepository::new();
        let society = domain_societies::Society::new(domain_societies::CreateSociety {
            name: "DHA Phase 2".to_string(),
            city: "Islamabad".to_string(),
            latitude: None,
            longitude: None,
        });
        let (ali, sara) = (author("Ali"), author("Sara"));
        repo.record(SearchRecord::new(ali.clone(), &society)).await.unwrap();
        repo.record(SearchRecord::new(ali.clone(), &society)).await.unwrap();
        repo.record(SearchRecord::new(sara.clone(), &society)).await.unwrap();

        assert_eq!(repo.delete_for_user(ali.id).await.unwrap(), 2);
        assert!(repo.history(ali.id).await.unwrap().is_empty());
        assert_eq!(repo.history(sara.id).await.unwrap().len(), 1);
        assert_eq!(repo.search_count(society.id).await.unwrap(), 1);
    }
}
