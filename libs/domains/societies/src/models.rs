use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::geo::GeoPoint;

/// Residential society
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Society {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    /// 0 together with `longitude` 0 means unset
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Society {
    pub fn new(input: CreateSociety) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            city: input.city.trim().to_string(),
            latitude: input.latitude.unwrap_or(0.0),
            longitude: input.longitude.unwrap_or(0.0),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn has_location(&self) -> bool {
        !self.location().is_unset()
    }

    pub fn apply_update(&mut self, update: UpdateSociety) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(city) = update.city {
            self.city = city.trim().to_string();
        }
        if let Some(latitude) = update.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            self.longitude = longitude;
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateSociety {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[schema(example = "Bahria Town")]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "City must be 1-100 characters"))]
    #[schema(example = "Islamabad")]
    pub city: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateSociety {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
}

/// One place near a society
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AmenityResult {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    /// From the society, not from the provider
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AmenityAnnotation {
    pub category: String,
    pub results: Vec<AmenityResult>,
}

impl AmenityAnnotation {
    pub fn empty(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            results: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SocietyWithAmenities {
    #[serde(flatten)]
    pub society: Society,
    pub amenities: Vec<AmenityAnnotation>,
    /// Distance from the query point; preference search only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

impl SocietyWithAmenities {
    /// True when every named category has at least one result
    pub fn has_all(&self, categories: &[&str]) -> bool {
        categories.iter().all(|wanted| {
            self.amenities
                .iter()
                .any(|a| a.category == *wanted && !a.results.is_empty())
        })
    }
}

/// Query for `GET /societies`
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct NameSearchQuery {
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    /// Case-insensitive name prefix
    #[validate(length(min = 1, message = "query is required"))]
    pub query: String,
}

/// Query for `GET /societies/preferences`
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PreferenceQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    /// Comma-separated category names, e.g. `Parks,Medical`
    #[validate(length(min = 1, message = "amenities is required"))]
    pub amenities: String,
    /// Kilometres
    #[validate(range(exclusive_min = 0.0))]
    pub radius: Option<f64>,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

impl PreferenceQuery {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    pub fn amenity_names(&self) -> Vec<&str> {
        self.amenities
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect()
    }
}
