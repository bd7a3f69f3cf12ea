use async_trait::async_trait;
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};
use uuid::Uuid;

use crate::entity::{self, Column, Entity};
use crate::error::{SocietyError, SocietyResult};
use crate::models::{Society, UpdateSociety};
use crate::repository::SocietyRepository;

/// `LIKE` pattern matching names that start with `prefix`, lowercased
fn prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn name_search(city: &str, prefix: &str, limit: usize) -> Select<Entity> {
    Entity::find()
        .filter(Column::City.eq(city))
        .filter(
            Expr::expr(Func::lower(Expr::col(Column::Name)))
                .like(LikeExpr::new(prefix_pattern(prefix)).escape('\\')),
        )
        .order_by_asc(Column::Name)
        .limit(limit as u64)
}

/// PostgreSQL implementation of SocietyRepository
#[derive(Clone)]
pub struct PgSocietyRepository {
    db: DatabaseConnection,
}

impl PgSocietyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_unique(&self, city: &str, name: &str, except: Option<Uuid>) -> SocietyResult<()> {
        let mut query = Entity::find()
            .filter(Column::City.eq(city))
            .filter(Column::Name.eq(name));
        if let Some(id) = except {
            query = query.filter(Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(SocietyError::Duplicate {
                name: name.to_string(),
                city: city.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SocietyRepository for PgSocietyRepository {
    async fn create(&self, society: Society) -> SocietyResult<Society> {
        self.ensure_unique(&society.city, &society.name, None).await?;

        let (name, city) = (society.name.clone(), society.city.clone());
        let model: entity::ActiveModel = society.into();
        // The unique index still catches a concurrent insert
        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SocietyError::from_write(e, &name, &city))?;
        Ok(created.into())
    }

    async fn get_by_id(&self, id: Uuid) -> SocietyResult<Option<Society>> {
        let result = Entity::find_by_id(id).one(&self.db).await?.map(Into::into);
        Ok(result)
    }

    async fn list(&self, city: Option<String>) -> SocietyResult<Vec<Society>> {
        let mut query = Entity::find();
        if let Some(city) = city {
            query = query.filter(Column::City.eq(city));
        }

        let societies = query
            .order_by_asc(Column::City)
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;
        Ok(societies.into_iter().map(Into::into).collect())
    }

    async fn search_by_name(
        &self,
        city: &str,
        prefix: &str,
        limit: usize,
    ) -> SocietyResult<Vec<Society>> {
        let found = name_search(city, prefix, limit).all(&self.db).await?;
        Ok(found.into_iter().map(Into::into).collect())
    }

    async fn list_with_coordinates(&self) -> SocietyResult<Vec<Society>> {
        let located = Entity::find()
            .filter(
                Condition::any()
                    .add(Column::Latitude.ne(0.0))
                    .add(Column::Longitude.ne(0.0)),
            )
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;
        Ok(located.into_iter().map(Into::into).collect())
    }

    async fn find_by_city_and_name(
        &self,
        city: &str,
        name: &str,
    ) -> SocietyResult<Option<Society>> {
        let result = Entity::find()
            .filter(Column::City.eq(city))
            .filter(Column::Name.eq(name))
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateSociety) -> SocietyResult<Society> {
        let existing = Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(SocietyError::NotFound(id))?;

        let mut society: Society = existing.clone().into();
        society.apply_update(input);
        self.ensure_unique(&society.city, &society.name, Some(id))
            .await?;

        let mut model: entity::ActiveModel = existing.into();
        model.name = Set(society.name.clone());
        model.city = Set(society.city.clone());
        model.latitude = Set(society.latitude);
        model.longitude = Set(society.longitude);
        model.updated_at = Set(society.updated_at.into());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SocietyError::from_write(e, &society.name, &society.city))?;
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> SocietyResult<bool> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, QueryTrait};

    fn model(name: &str, city: &str) -> entity::Model {
        let now = Utc::now().into();
        entity::Model {
            id: Uuid::now_v7(),
            name: name.to_string(),
            city: city.to_string(),
            latitude: 33.6,
            longitude: 73.0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_prefix_pattern_escapes_wildcards() {
        assert_eq!(prefix_pattern(" DHA "), "dha%");
        assert_eq!(prefix_pattern("50%_off"), "50\\%\\_off%");
        assert_eq!(prefix_pattern("a\\b"), "a\\\\b%");
    }

    #[test]
    fn test_name_search_filters_and_limits_in_sql() {
        let sql = name_search("Islamabad", "Bahria", 10)
            .build(DatabaseBackend::Postgres)
            .to_string();

        assert!(sql.contains("LOWER("), "{sql}");
        assert!(sql.contains("LIKE 'bahria%'"), "{sql}");
        assert!(sql.contains("\"city\" = 'Islamabad'"), "{sql}");
        assert!(sql.contains("ORDER BY"), "{sql}");
        assert!(sql.ends_with("LIMIT 10"), "{sql}");
    }

    #[tokio::test]
    async fn test_search_returns_rows_from_store() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model("Bahria Enclave", "Islamabad"),
                model("bahria Town", "Islamabad"),
            ]])
            .into_connection();
        let repo = PgSocietyRepository::new(db);

        let found = repo.search_by_name("Islamabad", "BAHRIA", 2).await.unwrap();
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bahria Enclave", "bahria Town"]);
    }

    #[tokio::test]
    async fn test_create_with_existing_pair_is_duplicate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model("Gulberg", "Lahore")]])
            .into_connection();
        let repo = PgSocietyRepository::new(db);

        let err = repo
            .create(Society::new(crate::models::CreateSociety {
                name: "Gulberg".to_string(),
                city: "Lahore".to_string(),
                latitude: None,
                longitude: None,
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, SocietyError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgSocietyRepository::new(db);

        let err = repo
            .update(Uuid::now_v7(), UpdateSociety::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SocietyError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgSocietyRepository::new(db);

        assert!(repo.delete(Uuid::now_v7()).await.unwrap());
        assert!(!repo.delete(Uuid::now_v7()).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_failure_is_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgSocietyRepository::new(db);

        let err = repo.list(None).await.unwrap_err();
        assert!(matches!(err, SocietyError::Database(_)));
    }
}
