//! Lookup tables built once per estimate from a [`ReferenceData`] snapshot.

use std::collections::HashMap;

use crate::error::{CostError, CostResult};
use crate::models::{ElectricalCost, QualityMaterial, QualityMaterialQuantity, Tier};

/// Rate per (material, tier)
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(String, Tier), f64>,
}

impl RateTable {
    pub fn from_rows(rows: &[QualityMaterial]) -> Self {
        let rates = rows
            .iter()
            .map(|row| ((row.material.clone(), row.quality), row.rate))
            .collect();
        Self { rates }
    }

    pub fn get(&self, material: &str, tier: Tier) -> CostResult<f64> {
        self.rates
            .get(&(material.to_string(), tier))
            .copied()
            .ok_or_else(|| CostError::MissingTierRate {
                material: material.to_string(),
                tier,
            })
    }
}

/// Tier-independent quantity per unit area, per material
#[derive(Debug, Clone, Default)]
pub struct QuantityTable {
    quantities: HashMap<String, f64>,
}

impl QuantityTable {
    pub fn from_rows(rows: &[QualityMaterialQuantity]) -> Self {
        let quantities = rows
            .iter()
            .map(|row| (row.material.clone(), row.quantity))
            .collect();
        Self { quantities }
    }

    /// `tier` only labels the error
    pub fn get(&self, material: &str, tier: Tier) -> CostResult<f64> {
        self.quantities
            .get(material)
            .copied()
            .ok_or_else(|| CostError::MissingQuantity {
                material: material.to_string(),
                tier,
            })
    }
}

/// Electrical items grouped by tier
#[derive(Debug, Clone, Default)]
pub struct ElectricalTable {
    by_tier: HashMap<Tier, Vec<(String, f64)>>,
}

impl ElectricalTable {
    pub fn from_rows(rows: &[ElectricalCost]) -> Self {
        let mut by_tier: HashMap<Tier, Vec<(String, f64)>> = HashMap::new();
        for row in rows {
            by_tier
                .entry(row.quality)
                .or_default()
                .push((row.item.clone(), row.rate));
        }
        Self { by_tier }
    }

    /// Sum of per-area rates of every item at `tier`. A tier with no items is a gap.
    pub fn rate_sum(&self, tier: Tier) -> CostResult<f64> {
        match self.by_tier.get(&tier) {
            Some(items) if !items.is_empty() => Ok(items.iter().map(|(_, rate)| rate).sum()),
            _ => Err(CostError::MissingTierRate {
                material: "Electrical".to_string(),
                tier,
            }),
        }
    }
}
