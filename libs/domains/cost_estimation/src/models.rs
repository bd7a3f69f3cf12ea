use chrono::{DateTime, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Square feet per marla
pub const SQFT_PER_MARLA: f64 = 225.0;

/// Key in `quality_selections` that picks the electrical tier rather than a material
pub const ELECTRICAL_SELECTION: &str = "Electrical";

/// Quality classification of a material or electrical item
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quality_tier")]
pub enum Tier {
    #[sea_orm(string_value = "High")]
    High,
    #[default]
    #[sea_orm(string_value = "Medium")]
    Medium,
    #[sea_orm(string_value = "Low")]
    Low,
}

/// Unit the plot area is given in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    #[default]
    Sqft,
    Marla,
}

impl AreaUnit {
    pub fn to_sqft(self, area: f64) -> f64 {
        match self {
            AreaUnit::Sqft => area,
            AreaUnit::Marla => area * SQFT_PER_MARLA,
        }
    }
}

/// Tier-independent material with a per-area rate and quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StandardMaterial {
    pub id: Uuid,
    pub material: String,
    pub rate: f64,
    pub quantity: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QualityMaterial {
    pub id: Uuid,
    pub material: String,
    pub quality: Tier,
    pub rate: f64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QualityMaterialQuantity {
    pub id: Uuid,
    pub material: String,
    pub quantity: f64,
    pub updated_at: DateTime<Utc>,
}

/// Electrical item; `rate` is already per unit of covered area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ElectricalCost {
    pub id: Uuid,
    pub item: String,
    pub quality: Tier,
    pub rate: f64,
    pub updated_at: DateTime<Utc>,
}

/// All four reference tables as read at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReferenceData {
    pub standard_materials: Vec<StandardMaterial>,
    pub quality_materials: Vec<QualityMaterial>,
    pub quality_material_quantities: Vec<QualityMaterialQuantity>,
    pub electrical_costs: Vec<ElectricalCost>,
}

/// Request body for `POST /estimate-cost`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct EstimateRequest {
    /// Plot area, in `area_unit`
    #[validate(range(exclusive_min = 0.0, message = "Area must be positive"))]
    #[schema(example = 1000.0)]
    pub area_sqft: f64,

    #[serde(default)]
    pub area_unit: AreaUnit,

    #[validate(range(min = 1, max = 3, message = "Number of floors must be 1, 2 or 3"))]
    #[schema(example = 1)]
    pub num_floors: u8,

    /// Material name to tier; the `Electrical` key selects the electrical tier
    #[serde(default)]
    pub quality_selections: BTreeMap<String, Tier>,

    /// Electrical tier when `quality_selections` has no `Electrical` key
    #[serde(default)]
    pub electrical_quality: Option<Tier>,

    #[serde(default)]
    pub finishing_touch_quality: Option<Tier>,
}

impl EstimateRequest {
    pub fn electrical_tier(&self) -> Tier {
        self.quality_selections
            .get(ELECTRICAL_SELECTION)
            .copied()
            .or(self.electrical_quality)
            .unwrap_or_default()
    }

    pub fn finishing_tier(&self) -> Tier {
        self.finishing_touch_quality.unwrap_or_default()
    }

    /// Material selections, without the electrical key
    pub fn material_selections(&self) -> impl Iterator<Item = (&str, Tier)> {
        self.quality_selections
            .iter()
            .filter(|(name, _)| name.as_str() != ELECTRICAL_SELECTION)
            .map(|(name, tier)| (name.as_str(), *tier))
    }
}

/// Cost breakdown; component keys match what the estimator form renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CostBreakdown {
    /// Plot area times floors, in sqft
    pub total_area: f64,
    pub covered_area: f64,
    pub development_cost_per_sqft: f64,
    #[serde(rename = "Standard Materials")]
    pub standard_materials: f64,
    #[serde(rename = "Quality Materials")]
    pub quality_materials: f64,
    #[serde(rename = "Electrical Components")]
    pub electrical_components: f64,
    #[serde(rename = "Finishing Touch")]
    pub finishing_touch: f64,
    #[serde(rename = "Labor Cost")]
    pub labor_cost: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    pub fn components(&self) -> [(&'static str, f64); 5] {
        [
            ("Standard Materials", self.standard_materials),
            ("Quality Materials", self.quality_materials),
            ("Electrical Components", self.electrical_components),
            ("Finishing Touch", self.finishing_touch),
            ("Labor Cost", self.labor_cost),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateStandardMaterial {
    #[validate(range(min = 0.0, message = "Rate must not be negative"))]
    pub rate: Option<f64>,
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateRate {
    #[validate(range(min = 0.0, message = "Rate must not be negative"))]
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateQuantity {
    #[validate(range(min = 0.0, message = "Quantity must not be negative"))]
    pub quantity: f64,
}
