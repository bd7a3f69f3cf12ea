//! Engagement Domain
//!
//! What users leave behind on the society directory: ratings of societies
//! and of the site, the societies each user looked at, and the trend and
//! ranking views built from those records.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod trends;

pub use error::{EngagementError, EngagementResult};
pub use models::{
    Author, ClearedHistory, CreateReview, NearbySociety, RecordSearch, SearchHistory,
    SearchRecord, SiteReview, SocietyReview, Trend, TrendReport, TrendingQuery, TrendingSociety,
};
pub use postgres::{PgReviewRepository, PgSearchHistoryRepository};
pub use repository::{
    InMemoryReviewRepository, InMemorySearchHistoryRepository, ReviewRepository,
    SearchHistoryRepository,
};
pub use service::EngagementService;
