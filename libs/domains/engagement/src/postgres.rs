use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::entity::{site_review, society_review, user_search};
use crate::error::EngagementResult;
use crate::models::{SearchRecord, SiteReview, SocietyReview};
use crate::repository::{ReviewRepository, SearchHistoryRepository};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    db: DatabaseConnection,
}

impl PgReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create_society_review(&self, review: SocietyReview) -> EngagementResult<SocietyReview> {
        let model: society_review::ActiveModel = review.into();
        Ok(model.insert(&self.db).await?.into())
    }

    async fn society_reviews(&self, society_id: Uuid) -> EngagementResult<Vec<SocietyReview>> {
        let models = society_review::Entity::find()
            .filter(society_review::Column::SocietyId.eq(society_id))
            .order_by_desc(society_review::Column::CreatedAt)
            .order_by_desc(society_review::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn review_counts(&self, society_ids: &[Uuid]) -> EngagementResult<HashMap<Uuid, u64>> {
        if society_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, i64)> = society_review::Entity::find()
            .select_only()
            .column(society_review::Column::SocietyId)
            .column_as(
                Expr::expr(Func::count(Expr::col(society_review::Column::Id))),
                "review_count",
            )
            .filter(society_review::Column::SocietyId.is_in(society_ids.iter().copied()))
            .group_by(society_review::Column::SocietyId)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, count)| (id, count.max(0) as u64))
            .collect())
    }

    async fn create_site_review(&self, review: SiteReview) -> EngagementResult<SiteReview> {
        let model: site_review::ActiveModel = review.into();
        Ok(model.insert(&self.db).await?.into())
    }

    async fn site_reviews(&self) -> EngagementResult<Vec<SiteReview>> {
        let models = site_review::Entity::find()
            .order_by_desc(site_review::Column::CreatedAt)
            .order_by_desc(site_review::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL implementation of SearchHistoryRepository
#[derive(Clone)]
pub struct PgSearchHistoryRepository {
    db: DatabaseConnection,
}

impl PgSearchHistoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SearchHistoryRepository for PgSearchHistoryRepository {
    async fn record(&self, record: SearchRecord) -> EngagementResult<SearchRecord> {
        let model: user_search::ActiveModel = record.into();
        Ok(model.insert(&self.db).await?.into())
    }

    async fn history(&self, user_id: Uuid) -> EngagementResult<Vec<SearchRecord>> {
        let models = user_search::Entity::find()
            .filter(user_search::Column::UserId.eq(user_id))
            .order_by_desc(user_search::Column::CreatedAt)
            .order_by_desc(user_search::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete_for_user(&self, user_id: Uuid) -> EngagementResult<u64> {
        let result = user_search::Entity::delete_many()
            .filter(user_search::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn search_count(&self, society_id: Uuid) -> EngagementResult<u64> {
        let count = user_search::Entity::find()
            .filter(user_search::Column::SocietyId.eq(society_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    async fn searched_at(&self, society_id: Uuid) -> EngagementResult<Vec<DateTime<Utc>>> {
        let times: Vec<sea_orm::prelude::DateTimeWithTimeZone> = user_search::Entity::find()
            .select_only()
            .column(user_search::Column::CreatedAt)
            .filter(user_search::Column::SocietyId.eq(society_id))
            .order_by_asc(user_search::Column::CreatedAt)
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(times.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_no_societies_skips_the_count_query() {
        // No results queued: any query would fail
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let repo = PgReviewRepository::new(db);
        assert!(repo.review_counts(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgReviewRepository::new(db);

        let err = repo.site_reviews().await.unwrap_err();
        assert!(matches!(err, crate::error::EngagementError::Database(_)));
    }

    #[tokio::test]
    async fn test_delete_for_user_reports_rows_removed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();
        let repo = PgSearchHistoryRepository::new(db);

        assert_eq!(repo.delete_for_user(Uuid::now_v7()).await.unwrap(), 3);
    }
}
