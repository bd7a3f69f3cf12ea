//! Societies Domain
//!
//! Society directory plus the amenity proximity search: each society is
//! annotated with what a places provider reports around its coordinates,
//! one provider query per amenity category.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Service    │  ← name / preference / single-society search, admin CRUD
//! └──┬────────┬──┘
//!    │        │
//! ┌──▼─────┐ ┌▼──────────────────┐
//! │ Repo   │ │ AmenityAggregator │  ← bounded fan-out, one branch per category
//! └────────┘ └────────┬──────────┘
//!                     │
//!            ┌────────▼───────┐
//!            │ PlacesProvider │  ← Google Places nearby search
//!            └────────────────┘
//! ```

pub mod aggregator;
pub mod amenities;
pub mod config;
pub mod entity;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod models;
pub mod places;
pub mod postgres;
pub mod repository;
pub mod service;

pub use aggregator::AmenityAggregator;
pub use amenities::{AmenityCatalog, AmenityCategory};
pub use config::{PlacesConfig, SearchConfig};
pub use error::{SocietyError, SocietyResult};
pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use models::{
    AmenityAnnotation, AmenityResult, CreateSociety, NameSearchQuery, PreferenceQuery, Society,
    SocietyWithAmenities, UpdateSociety,
};
pub use places::{GooglePlacesClient, Place, PlacesError, PlacesProvider};
pub use postgres::PgSocietyRepository;
pub use repository::{InMemorySocietyRepository, SocietyRepository};
pub use service::SocietyService;
