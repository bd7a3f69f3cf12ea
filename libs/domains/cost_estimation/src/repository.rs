use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CostError, CostResult};
use crate::models::{
    ElectricalCost, QualityMaterial, QualityMaterialQuantity, ReferenceData, StandardMaterial,
    Tier, UpdateStandardMaterial,
};

/// Data access for the four reference tables
///
/// Estimates only read through [`snapshot`](Self::snapshot); the per-row
/// methods back the admin screens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// Read all four tables
    async fn snapshot(&self) -> CostResult<ReferenceData>;

    async fn get_standard_material(&self, id: Uuid) -> CostResult<Option<StandardMaterial>>;

    async fn get_quality_material(&self, id: Uuid) -> CostResult<Option<QualityMaterial>>;

    async fn get_quality_material_quantity(
        &self,
        id: Uuid,
    ) -> CostResult<Option<QualityMaterialQuantity>>;

    async fn get_electrical_cost(&self, id: Uuid) -> CostResult<Option<ElectricalCost>>;

    async fn update_standard_material(
        &self,
        id: Uuid,
        input: UpdateStandardMaterial,
    ) -> CostResult<StandardMaterial>;

    async fn update_quality_material_rate(&self, id: Uuid, rate: f64)
    -> CostResult<QualityMaterial>;

    async fn update_quality_material_quantity(
        &self,
        id: Uuid,
        quantity: f64,
    ) -> CostResult<QualityMaterialQuantity>;

    async fn update_electrical_cost_rate(&self, id: Uuid, rate: f64) -> CostResult<ElectricalCost>;
}

/// In-memory implementation for tests and local runs
#[derive(Clone, Default)]
pub struct InMemoryReferenceDataRepository {
    data: Arc<RwLock<ReferenceData>>,
}

impl InMemoryReferenceDataRepository {
    pub fn new(data: ReferenceData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Loaded with the same rows the seed migration inserts
    pub fn seeded() -> Self {
        Self::new(seeded_reference_data())
    }
}

fn not_found(table: &'static str, id: Uuid) -> CostError {
    CostError::NotFound { table, id }
}

#[async_trait]
impl ReferenceDataRepository for InMemoryReferenceDataRepository {
    async fn snapshot(&self) -> CostResult<ReferenceData> {
        Ok(self.data.read().await.clone())
    }

    async fn get_standard_material(&self, id: Uuid) -> CostResult<Option<StandardMaterial>> {
        let data = self.data.read().await;
        Ok(data.standard_materials.iter().find(|m| m.id == id).cloned())
    }

    async fn get_quality_material(&self, id: Uuid) -> CostResult<Option<QualityMaterial>> {
        let data = self.data.read().await;
        Ok(data.quality_materials.iter().find(|m| m.id == id).cloned())
    }

    async fn get_quality_material_quantity(
        &self,
        id: Uuid,
    ) -> CostResult<Option<QualityMaterialQuantity>> {
        let data = self.data.read().await;
        Ok(data
            .quality_material_quantities
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn get_electrical_cost(&self, id: Uuid) -> CostResult<Option<ElectricalCost>> {
        let data = self.data.read().await;
        Ok(data.electrical_costs.iter().find(|m| m.id == id).cloned())
    }

    async fn update_standard_material(
        &self,
        id: Uuid,
        input: UpdateStandardMaterial,
    ) -> CostResult<StandardMaterial> {
        let mut data = self.data.write().await;
        let row = data
            .standard_materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Standard material", id))?;

        if let Some(rate) = input.rate {
            row.rate = rate;
        }
        if let Some(quantity) = input.quantity {
            row.quantity = quantity;
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn update_quality_material_rate(
        &self,
        id: Uuid,
        rate: f64,
    ) -> CostResult<QualityMaterial> {
        let mut data = self.data.write().await;
        let row = data
            .quality_materials
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Quality material", id))?;
        row.rate = rate;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn update_quality_material_quantity(
        &self,
        id: Uuid,
        quantity: f64,
    ) -> CostResult<QualityMaterialQuantity> {
        let mut data = self.data.write().await;
        let row = data
            .quality_material_quantities
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Quality material quantity", id))?;
        row.quantity = quantity;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn update_electrical_cost_rate(&self, id: Uuid, rate: f64) -> CostResult<ElectricalCost> {
        let mut data = self.data.write().await;
        let row = data
            .electrical_costs
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Electrical cost", id))?;
        row.rate = rate;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

const STANDARD_MATERIALS: [(&str, f64, f64); 18] = [
    ("25 mm o/d Pipe", 19.38, 0.181),
    ("32 mm o/d Pipe", 6.01, 0.072),
    ("40 mm o/d Pipe", 4.73, 0.018),
    ("50 mm o/d Pipe", 8.96, 0.022),
    ("32 mm o/d Insulation", 5.83, 0.035),
    ("50 mm o/d Insulation", 13.71, 0.022),
    ("2\" Dia Pipe", 19.20, 0.072),
    ("3\" Dia Pipe", 25.72, 0.072),
    ("4\" Dia Pipe", 18.86, 0.108),
    ("GI Welded Pipeline 3/4” i/d", 56.04, 0.135),
    ("Gas Cock 3/4\" i/d", 2.48, 0.002),
    ("Floor Drains", 9.53, 0.006),
    ("1\" dia Class \"E\" Pipe", 13.39, 0.122),
    ("6\" dia Class \"B\" Pipe", 31.84, 0.045),
    ("Roof Insulation", 246.00, 0.129),
    ("Termite Proofing", 1600.00, 0.004),
    ("Water Proofing", 114.00, 0.129),
    ("Excavation & Backfill + Ghassu", 23.00, 3.284),
];

/// (material, High, Medium, Low, quantity per sqft)
const QUALITY_MATERIALS: [(&str, f64, f64, f64, f64); 5] = [
    ("Cement", 1510.0, 1205.0, 1095.0, 0.54),
    ("Bricks", 22.0, 16.0, 12.0, 50.01),
    ("Steel", 280.0, 276.0, 272.0, 2.96),
    ("Sand", 110.0, 60.0, 44.0, 2.69),
    ("Aggregate", 150.0, 120.0, 80.0, 1.53),
];

/// (item, High, Medium, Low)
const ELECTRICAL_ITEMS: [(&str, f64, f64, f64); 6] = [
    ("Switch Boards", 1500.0, 1390.0, 1200.0),
    ("3/4” dia. Electrical PVC Conduit", 35.0, 30.0, 25.0),
    ("1” dia. Electrical PVC Conduit", 38.0, 32.0, 28.0),
    ("1.5” dia. Electrical PVC Conduit", 45.0, 41.0, 37.0),
    ("2” dia. Electrical PVC Conduit", 55.0, 50.0, 45.0),
    ("PVC Ceiling Fan Hook", 600.0, 547.0, 500.0),
];

/// The reference rows inserted by the seed migration
pub fn seeded_reference_data() -> ReferenceData {
    let now = Utc::now();
    let tiers = |high: f64, medium: f64, low: f64| {
        [(Tier::High, high), (Tier::Medium, medium), (Tier::Low, low)]
    };

    ReferenceData {
        standard_materials: STANDARD_MATERIALS
            .iter()
            .map(|&(material, rate, quantity)| StandardMaterial {
                id: Uuid::now_v7(),
                material: material.to_string(),
                rate,
                quantity,
                updated_at: now,
            })
            .collect(),
        quality_materials: QUALITY_MATERIALS
            .iter()
            .flat_map(|&(material, high, medium, low, _)| {
                tiers(high, medium, low)
                    .into_iter()
                    .map(move |(quality, rate)| QualityMaterial {
                        id: Uuid::now_v7(),
                        material: material.to_string(),
                        quality,
                        rate,
                        updated_at: now,
                    })
            })
            .collect(),
        quality_material_quantities: QUALITY_MATERIALS
            .iter()
            .map(|&(material, _, _, _, quantity)| QualityMaterialQuantity {
                id: Uuid::now_v7(),
                material: material.to_string(),
                quantity,
                updated_at: now,
            })
            .collect(),
        electrical_costs: ELECTRICAL_ITEMS
            .iter()
            .flat_map(|&(item, high, medium, low)| {
                tiers(high, medium, low)
                    .into_iter()
                    .map(move |(quality, rate)| ElectricalCost {
                        id: Uuid::now_v7(),
                        item: item.to_string(),
                        quality,
                        rate,
                        updated_at: now,
                    })
            })
            .collect(),
    }
}
