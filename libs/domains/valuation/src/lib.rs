//! Valuation Domain
//!
//! Thin proxies in front of two model services: a house price predictor
//! and a society recommender. Requests are checked here, forwarded over
//! HTTP, and the answers are reshaped for the client.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use client::{HttpValuationClient, ValuationBackend};
pub use config::ValuationConfig;
pub use error::{ValuationError, ValuationResult};
pub use models::{
    PlotPoint, PredictRequest, Prediction, PredictorRequest, RecommendRequest, Recommendation,
    Recommendations,
};
pub use service::ValuationService;
