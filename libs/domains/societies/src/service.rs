use observability::AmenityMetrics;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::aggregator::AmenityAggregator;
use crate::amenities::AmenityCategory;
use crate::config::SearchConfig;
use crate::error::{SocietyError, SocietyResult};
use crate::geo::haversine_km;
use crate::models::{
    CreateSociety, NameSearchQuery, PreferenceQuery, Society, SocietyWithAmenities, UpdateSociety,
};
use crate::places::PlacesProvider;
use crate::repository::SocietyRepository;

/// Society search with amenity annotation, plus society maintenance
#[derive(Clone)]
pub struct SocietyService<R: SocietyRepository, P: PlacesProvider> {
    repository: Arc<R>,
    aggregator: AmenityAggregator<P>,
    search: SearchConfig,
}

fn validate(input: &impl Validate) -> SocietyResult<()> {
    input
        .validate()
        .map_err(|e| SocietyError::InvalidInput(e.to_string()))
}

impl<R: SocietyRepository, P: PlacesProvider> SocietyService<R, P> {
    pub fn new(repository: R, aggregator: AmenityAggregator<P>, search: SearchConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            aggregator,
            search,
        }
    }

    async fn annotate(&self, society: Society) -> SocietyWithAmenities {
        let amenities = self.aggregator.annotate(society.location()).await;
        SocietyWithAmenities {
            society,
            amenities,
            distance_km: None,
        }
    }

    /// Societies are annotated one after another so a request never has
    /// more than `max_concurrency` provider calls in flight.
    async fn annotate_each(&self, societies: Vec<Society>) -> Vec<SocietyWithAmenities> {
        let mut annotated = Vec::with_capacity(societies.len());
        for society in societies {
            annotated.push(self.annotate(society).await);
        }
        annotated
    }

    /// Name-prefix search within one city
    pub async fn search_by_name(
        &self,
        query: NameSearchQuery,
    ) -> SocietyResult<Vec<SocietyWithAmenities>> {
        let (city, prefix) = (query.city.trim(), query.query.trim());
        if city.is_empty() || prefix.is_empty() {
            return Err(SocietyError::InvalidInput(
                "city and query are required".to_string(),
            ));
        }

        let societies = self
            .repository
            .search_by_name(city, prefix, self.search.name_search_limit)
            .await?;
        let annotated = self.annotate_each(societies).await;

        tracing::info!(city, query = prefix, results = annotated.len(), "Name search");
        AmenityMetrics::record_search("name", annotated.len());
        Ok(annotated)
    }

    /// Nearest societies within `radius` km having every requested category
    pub async fn search_by_preferences(
        &self,
        query: PreferenceQuery,
    ) -> SocietyResult<Vec<SocietyWithAmenities>> {
        validate(&query)?;

        let requested = query.amenity_names();
        if requested.is_empty() {
            return Err(SocietyError::InvalidInput(
                "amenities must name at least one category".to_string(),
            ));
        }

        // Unknown categories can never be satisfied
        let catalog = self.aggregator.catalog();
        let Some(wanted) = requested
            .iter()
            .map(|name| catalog.get(name).map(|c| c.name.clone()))
            .collect::<Option<Vec<String>>>()
        else {
            tracing::debug!(amenities = %query.amenities, "Unknown amenity category requested");
            AmenityMetrics::record_search("preferences", 0);
            return Ok(Vec::new());
        };
        // Only the requested categories are queried, in catalog order
        let selected: Vec<AmenityCategory> = catalog
            .categories()
            .iter()
            .filter(|c| wanted.contains(&c.name))
            .cloned()
            .collect();
        let wanted: Vec<&str> = wanted.iter().map(String::as_str).collect();

        let origin = query.point();
        let radius_km = query.radius.unwrap_or(self.search.default_radius_km);
        let limit = query.limit.unwrap_or(self.search.default_limit);

        let mut candidates: Vec<(Society, f64)> = self
            .repository
            .list_with_coordinates()
            .await?
            .into_iter()
            .filter(|s| s.has_location())
            .map(|s| {
                let distance = haversine_km(origin, s.location());
                (s, distance)
            })
            .filter(|(_, distance)| *distance <= radius_km)
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let mut matches = Vec::new();
        for (society, distance) in candidates {
            if matches.len() >= limit {
                break;
            }
            let amenities = self
                .aggregator
                .annotate_categories(society.location(), &selected)
                .await;
            let candidate = SocietyWithAmenities {
                society,
                amenities,
                distance_km: Some(distance),
            };
            if candidate.has_all(&wanted) {
                matches.push(candidate);
            }
        }

        tracing::info!(
            latitude = origin.lat,
            longitude = origin.lng,
            radius_km,
            results = matches.len(),
            "Preference search"
        );
        AmenityMetrics::record_search("preferences", matches.len());
        Ok(matches)
    }

    /// One society with its full annotation
    pub async fn amenities_for(&self, id: Uuid) -> SocietyResult<SocietyWithAmenities> {
        let society = self.get_society(id).await?;
        let annotated = self.annotate(society).await;
        AmenityMetrics::record_search("single", 1);
        Ok(annotated)
    }

    pub async fn find_in_city(&self, city: &str, name: &str) -> SocietyResult<Option<Society>> {
        self.repository.find_by_city_and_name(city, name).await
    }

    pub async fn create_society(&self, input: CreateSociety) -> SocietyResult<Society> {
        validate(&input)?;
        let society = self.repository.create(Society::new(input)).await?;
        tracing::info!(society_id = %society.id, city = %society.city, "Society created");
        Ok(society)
    }

    pub async fn list_societies(&self, city: Option<String>) -> SocietyResult<Vec<Society>> {
        self.repository.list(city).await
    }

    pub async fn get_society(&self, id: Uuid) -> SocietyResult<Society> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(SocietyError::NotFound(id))
    }

    pub async fn update_society(&self, id: Uuid, input: UpdateSociety) -> SocietyResult<Society> {
        validate(&input)?;
        self.repository.update(id, input).await
    }

    pub async fn delete_society(&self, id: Uuid) -> SocietyResult<()> {
        if self.repository.delete(id).await? {
            tracing::info!(society_id = %id, "Society deleted");
            Ok(())
        } else {
            Err(SocietyError::NotFound(id))
        }
    }
}
