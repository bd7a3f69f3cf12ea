//! Cost Estimation Domain
//!
//! Rolls a plot's area, floor count and per-material quality choices up
//! against the four reference tables into a construction cost breakdown.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /estimate-cost, reference data admin
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌───────────────┐
//! │   Service   │ ──▶ │ CostEstimator │  ← pure arithmetic over a snapshot
//! └──────┬──────┘     └───────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← reference tables (Postgres / in-memory)
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod estimator;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod rate_table;
pub mod repository;
pub mod service;

pub use error::{CostError, CostResult};
pub use estimator::{CostEstimator, EstimatorPolicy, FinishingMultipliers};
pub use models::{
    AreaUnit, CostBreakdown, ElectricalCost, EstimateRequest, QualityMaterial,
    QualityMaterialQuantity, ReferenceData, StandardMaterial, Tier, UpdateQuantity, UpdateRate,
    UpdateStandardMaterial,
};
pub use postgres::PgReferenceDataRepository;
pub use rate_table::{ElectricalTable, QuantityTable, RateTable};
pub use repository::{InMemoryReferenceDataRepository, ReferenceDataRepository};
pub use service::CostEstimationService;
