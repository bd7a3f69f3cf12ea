use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{SocietyError, SocietyResult};
use crate::models::{Society, UpdateSociety};

/// Data access for societies
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocietyRepository: Send + Sync {
    /// Insert a new society; `Duplicate` when (city, name) is taken
    async fn create(&self, society: Society) -> SocietyResult<Society>;

    async fn get_by_id(&self, id: Uuid) -> SocietyResult<Option<Society>>;

    /// All societies ordered by city then name, optionally within one city
    async fn list(&self, city: Option<String>) -> SocietyResult<Vec<Society>>;

    /// Exact city, case-insensitive name prefix, ordered by name
    async fn search_by_name(
        &self,
        city: &str,
        prefix: &str,
        limit: usize,
    ) -> SocietyResult<Vec<Society>>;

    /// Societies whose coordinates are set, in insertion order
    async fn list_with_coordinates(&self) -> SocietyResult<Vec<Society>>;

    async fn find_by_city_and_name(&self, city: &str, name: &str)
    -> SocietyResult<Option<Society>>;

    async fn update(&self, id: Uuid, input: UpdateSociety) -> SocietyResult<Society>;

    async fn delete(&self, id: Uuid) -> SocietyResult<bool>;
}

fn name_has_prefix(name: &str, prefix: &str) -> bool {
    name.to_lowercase().starts_with(&prefix.trim().to_lowercase())
}

/// In-memory implementation for tests and local runs
#[derive(Clone, Default)]
pub struct InMemorySocietyRepository {
    societies: Arc<RwLock<HashMap<Uuid, Society>>>,
}

impl InMemorySocietyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut societies: Vec<Society>) -> Vec<Society> {
    societies.sort_by(|a, b| a.city.cmp(&b.city).then_with(|| a.name.cmp(&b.name)));
    societies
}

#[async_trait]
impl SocietyRepository for InMemorySocietyRepository {
    async fn create(&self, society: Society) -> SocietyResult<Society> {
        let mut societies = self.societies.write().await;
        if societies
            .values()
            .any(|s| s.city == society.city && s.name == society.name)
        {
            return Err(SocietyError::Duplicate {
                name: society.name,
                city: society.city,
            });
        }
        societies.insert(society.id, society.clone());
        Ok(society)
    }

    async fn get_by_id(&self, id: Uuid) -> SocietyResult<Option<Society>> {
        Ok(self.societies.read().await.get(&id).cloned())
    }

    async fn list(&self, city: Option<String>) -> SocietyResult<Vec<Society>> {
        let societies = self.societies.read().await;
        let filtered = societies
            .values()
            .filter(|s| city.as_ref().is_none_or(|c| &s.city == c))
            .cloned()
            .collect();
        Ok(sorted(filtered))
    }

    async fn search_by_name(
        &self,
        city: &str,
        prefix: &str,
        limit: usize,
    ) -> SocietyResult<Vec<Society>> {
        let societies = self.societies.read().await;
        let mut matches: Vec<Society> = societies
            .values()
            .filter(|s| s.city == city && name_has_prefix(&s.name, prefix))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.truncate(limit);
        Ok(matches)
    }

    async fn list_with_coordinates(&self) -> SocietyResult<Vec<Society>> {
        let societies = self.societies.read().await;
        let mut located: Vec<Society> = societies
            .values()
            .filter(|s| s.has_location())
            .cloned()
            .collect();
        // v7 ids sort by creation time
        located.sort_by_key(|s| s.id);
        Ok(located)
    }

    async fn find_by_city_and_name(
        &self,
        city: &str,
        name: &str,
    ) -> SocietyResult<Option<Society>> {
        let societies = self.societies.read().await;
        Ok(societies
            .values()
            .find(|s| s.city == city && s.name == name)
            .cloned())
    }

    async fn update(&self, id: Uuid, input: UpdateSociety) -> SocietyResult<Society> {
        let mut societies = self.societies.write().await;

        let mut updated = societies
            .get(&id)
            .cloned()
            .ok_or(SocietyError::NotFound(id))?;
        updated.apply_update(input);

        if societies
            .values()
            .any(|s| s.id != id && s.city == updated.city && s.name == updated.name)
        {
            return Err(SocietyError::Duplicate {
                name: updated.name,
                city: updated.city,
            });
        }

        societies.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> SocietyResult<bool> {
        Ok(self.societies.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateSociety;

    fn society(name: &str, city: &str, coords: Option<(f64, f64)>) -> Society {
        Society::new(CreateSociety {
            name: name.to_string(),
            city: city.to_string(),
            latitude: coords.map(|c| c.0),
            longitude: coords.map(|c| c.1),
        })
    }

    #[tokio::test]
    async fn test_duplicate_city_and_name_is_rejected() {
        let repo = InMemorySocietyRepository::new();
        repo.create(society("Bahria Town", "Lahore", None)).await.unwrap();

        let err = repo
            .create(society("Bahria Town", "Lahore", None))
            .await
            .unwrap_err();
        assert!(matches!(err, SocietyError::Duplicate { .. }));

        // Same name in another city is fine
        repo.create(society("Bahria Town", "Karachi", None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_search_by_name_is_prefix_and_case_insensitive() {
        let repo = InMemorySocietyRepository::new();
        for name in ["DHA Phase 1", "DHA Phase 2", "Gulberg", "dha valley"] {
            repo.create(society(name, "Islamabad", None)).await.unwrap();
        }
        repo.create(society("DHA Phase 5", "Lahore", None)).await.unwrap();

        let found = repo.search_by_name("Islamabad", "dha", 10).await.unwrap();
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["DHA Phase 1", "DHA Phase 2", "dha valley"]);

        let limited = repo.search_by_name("Islamabad", "DHA", 1).await.unwrap();
        assert_eq!(limited.len(), 1);

        assert!(repo.search_by_name("Islamabad", "Bahria", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_with_coordinates_skips_unset() {
        let repo = InMemorySocietyRepository::new();
        repo.create(society("Unmapped", "Islamabad", None)).await.unwrap();
        repo.create(society("Mapped", "Islamabad", Some((33.6, 73.0))))
            .await
            .unwrap();

        let located = repo.list_with_coordinates().await.unwrap();
        assert_eq!(located.len(), 1);
        assert_eq!(located[0].name, "Mapped");
    }

    #[tokio::test]
    async fn test_ids_are_v7_and_keep_insertion_order() {
        let repo = InMemorySocietyRepository::new();
        for name in ["Zaraj", "Margalla", "Askari"] {
            repo.create(society(name, "Islamabad", Some((33.6, 73.0))))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let located = repo.list_with_coordinates().await.unwrap();
        assert!(located.iter().all(|s| s.id.get_version_num() == 7));
        let names: Vec<_> = located.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Zaraj", "Margalla", "Askari"]);
    }

    #[tokio::test]
    async fn test_update_into_existing_pair_is_duplicate() {
        let repo = InMemorySocietyRepository::new();
        repo.create(society("A", "Lahore", None)).await.unwrap();
        let b = repo.create(society("B", "Lahore", None)).await.unwrap();

        let err = repo
            .update(
                b.id,
                UpdateSociety {
                    name: Some("A".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SocietyError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_delete_reports_missing() {
        let repo = InMemorySocietyRepository::new();
        let s = repo.create(society("A", "Lahore", None)).await.unwrap();
        assert!(repo.delete(s.id).await.unwrap());
        assert!(!repo.delete(s.id).await.unwrap());
    }
}
