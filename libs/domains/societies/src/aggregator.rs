//! Bounded fan-out of provider queries around one location.
//!
//! Every catalog category is a branch. Branches run at most
//! `max_concurrency` at a time and come back in catalog order. A branch
//! that fails or times out contributes an empty result list; it never
//! fails the whole annotation. Results farther than the search radius
//! are dropped, since the provider only uses the radius as a bias.

use futures::future::join_all;
use futures::{FutureExt, StreamExt};
use observability::{AmenityMetrics, ProviderOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::amenities::{AmenityCatalog, AmenityCategory};
use crate::config::PlacesConfig;
use crate::geo::{GeoPoint, haversine_km};
use crate::models::{AmenityAnnotation, AmenityResult};
use crate::places::{Place, PlacesError, PlacesProvider};

pub struct AmenityAggregator<P: PlacesProvider> {
    provider: Arc<P>,
    catalog: AmenityCatalog,
    radius_m: u32,
    call_timeout: Duration,
    max_concurrency: usize,
}

impl<P: PlacesProvider> Clone for AmenityAggregator<P> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            catalog: self.catalog.clone(),
            radius_m: self.radius_m,
            call_timeout: self.call_timeout,
            max_concurrency: self.max_concurrency,
        }
    }
}

impl<P: PlacesProvider> AmenityAggregator<P> {
    pub fn new(provider: Arc<P>, config: &PlacesConfig) -> Self {
        Self {
            provider,
            catalog: config.catalog.clone(),
            radius_m: config.search_radius_m,
            call_timeout: config.timeout,
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    pub fn catalog(&self) -> &AmenityCatalog {
        &self.catalog
    }

    pub fn radius_km(&self) -> f64 {
        f64::from(self.radius_m) / 1000.0
    }

    /// One annotation per catalog category, in catalog order
    pub async fn annotate(&self, location: GeoPoint) -> Vec<AmenityAnnotation> {
        self.annotate_categories(location, self.catalog.categories())
            .await
    }

    /// Annotation restricted to `categories`, in the order given
    pub async fn annotate_categories(
        &self,
        location: GeoPoint,
        categories: &[AmenityCategory],
    ) -> Vec<AmenityAnnotation> {
        if location.is_unset() {
            return empty_annotation(categories);
        }

        let this = self.clone();
        futures::stream::iter(categories.to_vec())
            .map(move |category| {
                let this = this.clone();
                async move { this.category_branch(location, &category).await }.boxed()
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    pub fn empty_annotation(&self) -> Vec<AmenityAnnotation> {
        empty_annotation(self.catalog.categories())
    }

    async fn category_branch(
        &self,
        location: GeoPoint,
        category: &AmenityCategory,
    ) -> AmenityAnnotation {
        let started = Instant::now();
        let calls = category
            .place_types
            .iter()
            .map(|place_type| self.call(location, place_type));
        let outcomes = join_all(calls).await;

        let mut places = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(found) => places.extend(found),
                Err(e) => failures.push(e),
            }
        }

        // The branch only fails when every place type behind it failed
        let outcome = match failures.last() {
            Some(e) if failures.len() == category.place_types.len() => {
                tracing::warn!(
                    category = %category.name,
                    error = %e,
                    "Amenity lookup failed, returning no results for category"
                );
                e.outcome()
            }
            Some(e) => {
                tracing::debug!(
                    category = %category.name,
                    failed = failures.len(),
                    error = %e,
                    "Some place types failed for category"
                );
                ProviderOutcome::Ok
            }
            None => ProviderOutcome::Ok,
        };
        AmenityMetrics::record_provider_call(&category.name, outcome, started.elapsed());

        let radius_km = self.radius_km();
        AmenityAnnotation {
            category: category.name.clone(),
            results: places
                .into_iter()
                .map(|place| to_result(location, place))
                .filter(|result| result.distance_km <= radius_km)
                .collect(),
        }
    }

    async fn call(&self, location: GeoPoint, place_type: &str) -> Result<Vec<Place>, PlacesError> {
        tokio::time::timeout(
            self.call_timeout,
            self.provider.nearby(location, self.radius_m, place_type),
        )
        .await
        .unwrap_or(Err(PlacesError::Timeout))
    }
}

fn empty_annotation(categories: &[AmenityCategory]) -> Vec<AmenityAnnotation> {
    categories
        .iter()
        .map(|c| AmenityAnnotation::empty(&c.name))
        .collect()
}

fn to_result(origin: GeoPoint, place: Place) -> AmenityResult {
    AmenityResult {
        distance_km: haversine_km(origin, place.location),
        name: place.name,
        address: place.address,
        location: place.location,
    }
}
