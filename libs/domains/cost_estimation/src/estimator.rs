//! The cost rollup itself. No I/O: callers pass the reference snapshot in.

use core_config::{ConfigError, FromEnv, env_parse};

use crate::error::{CostError, CostResult};
use crate::models::{CostBreakdown, EstimateRequest, ReferenceData, Tier};
use crate::rate_table::{ElectricalTable, QuantityTable, RateTable};

/// Share of base cost charged as finishing, per finishing tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishingMultipliers {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl FinishingMultipliers {
    pub fn for_tier(&self, tier: Tier) -> f64 {
        match tier {
            Tier::High => self.high,
            Tier::Medium => self.medium,
            Tier::Low => self.low,
        }
    }
}

impl Default for FinishingMultipliers {
    fn default() -> Self {
        Self {
            high: 1.20,
            medium: 1.00,
            low: 0.80,
        }
    }
}

/// Policy constants of the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorPolicy {
    /// Buildable footprint per floor as a share of plot area
    pub coverage_factor: f64,
    pub labor_rate_per_sqft: f64,
    pub finishing: FinishingMultipliers,
}

impl Default for EstimatorPolicy {
    fn default() -> Self {
        Self {
            coverage_factor: 0.88,
            labor_rate_per_sqft: 450.0,
            finishing: FinishingMultipliers::default(),
        }
    }
}

/// Environment variables:
/// - `COST_COVERAGE_FACTOR` (default: 0.88, must be in (0, 1])
/// - `COST_LABOR_RATE_PER_SQFT` (default: 450)
/// - `COST_FINISHING_HIGH` / `COST_FINISHING_MEDIUM` / `COST_FINISHING_LOW`
///   (defaults: 1.20 / 1.00 / 0.80)
impl FromEnv for EstimatorPolicy {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let policy = Self {
            coverage_factor: env_parse("COST_COVERAGE_FACTOR", defaults.coverage_factor)?,
            labor_rate_per_sqft: env_parse(
                "COST_LABOR_RATE_PER_SQFT",
                defaults.labor_rate_per_sqft,
            )?,
            finishing: FinishingMultipliers {
                high: env_parse("COST_FINISHING_HIGH", defaults.finishing.high)?,
                medium: env_parse("COST_FINISHING_MEDIUM", defaults.finishing.medium)?,
                low: env_parse("COST_FINISHING_LOW", defaults.finishing.low)?,
            },
        };

        if !(policy.coverage_factor > 0.0 && policy.coverage_factor <= 1.0) {
            return Err(ConfigError::Invalid {
                key: "COST_COVERAGE_FACTOR".to_string(),
                details: format!("{} is not in (0, 1]", policy.coverage_factor),
            });
        }
        for (key, value) in [
            ("COST_LABOR_RATE_PER_SQFT", policy.labor_rate_per_sqft),
            ("COST_FINISHING_HIGH", policy.finishing.high),
            ("COST_FINISHING_MEDIUM", policy.finishing.medium),
            ("COST_FINISHING_LOW", policy.finishing.low),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    details: format!("{value} must be a non-negative number"),
                });
            }
        }

        Ok(policy)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CostEstimator {
    policy: EstimatorPolicy,
}

impl CostEstimator {
    pub fn new(policy: EstimatorPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EstimatorPolicy {
        &self.policy
    }

    pub fn estimate(
        &self,
        request: &EstimateRequest,
        reference: &ReferenceData,
    ) -> CostResult<CostBreakdown> {
        let area_sqft = request.area_unit.to_sqft(request.area_sqft);
        if !area_sqft.is_finite() || area_sqft <= 0.0 {
            return Err(CostError::InvalidArea(format!(
                "{} is not a positive area",
                request.area_sqft
            )));
        }
        if !(1..=3).contains(&request.num_floors) {
            return Err(CostError::InvalidInput(format!(
                "Number of floors must be 1, 2 or 3, got {}",
                request.num_floors
            )));
        }

        let floors = f64::from(request.num_floors);
        let total_area = area_sqft * floors;
        let covered_area = area_sqft * self.policy.coverage_factor * floors;

        let standard_materials = reference
            .standard_materials
            .iter()
            .map(|m| m.rate * m.quantity * covered_area)
            .sum::<f64>();

        let rates = RateTable::from_rows(&reference.quality_materials);
        let quantities = QuantityTable::from_rows(&reference.quality_material_quantities);
        let mut quality_materials = 0.0;
        for (material, tier) in request.material_selections() {
            let rate = rates.get(material, tier)?;
            let quantity = quantities.get(material, tier)?;
            quality_materials += rate * quantity * covered_area;
        }

        let electrical = ElectricalTable::from_rows(&reference.electrical_costs);
        let electrical_components = electrical.rate_sum(request.electrical_tier())? * covered_area;

        let base = standard_materials + quality_materials + electrical_components;
        let finishing_touch = self.policy.finishing.for_tier(request.finishing_tier()) * base;
        let labor_cost = self.policy.labor_rate_per_sqft * covered_area;

        let total_cost = base + finishing_touch + labor_cost;

        Ok(CostBreakdown {
            total_area,
            covered_area,
            development_cost_per_sqft: total_cost / area_sqft,
            standard_materials,
            quality_materials,
            electrical_components,
            finishing_touch,
            labor_cost,
            total_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AreaUnit;
    use crate::repository::seeded_reference_data;
    use std::collections::BTreeMap;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-6 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn all_of(tier: Tier) -> BTreeMap<String, Tier> {
        ["Cement", "Bricks", "Steel", "Sand", "Aggregate", "Electrical"]
            .into_iter()
            .map(|name| (name.to_string(), tier))
            .collect()
    }

    fn request(area_sqft: f64, num_floors: u8, tier: Tier) -> EstimateRequest {
        EstimateRequest {
            area_sqft,
            area_unit: AreaUnit::Sqft,
            num_floors,
            quality_selections: all_of(tier),
            electrical_quality: None,
            finishing_touch_quality: Some(tier),
        }
    }

    #[test]
    fn test_all_high_thousand_sqft_single_floor() {
        let estimator = CostEstimator::default();
        let breakdown = estimator
            .estimate(&request(1000.0, 1, Tier::High), &seeded_reference_data())
            .unwrap();

        assert_close(breakdown.total_area, 1000.0);
        assert_close(breakdown.covered_area, 880.0);
        // Σ rate×quantity over the 18 standard materials is 149.06547
        assert_close(breakdown.standard_materials, 131_177.6136);
        // Σ High rate×quantity over the five quality materials is 3269.82
        assert_close(breakdown.quality_materials, 2_877_441.6);
        // High electrical rates sum to 2273
        assert_close(breakdown.electrical_components, 2_000_240.0);
        assert_close(breakdown.finishing_touch, 6_010_631.056_32);
        assert_close(breakdown.labor_cost, 396_000.0);
        assert_close(breakdown.total_cost, 11_415_490.269_92);
        assert_close(breakdown.development_cost_per_sqft, 11_415.490_269_92);
    }

    #[test]
    fn test_total_is_sum_of_components() {
        let estimator = CostEstimator::default();
        let reference = seeded_reference_data();

        for tier in [Tier::High, Tier::Medium, Tier::Low] {
            for floors in 1..=3 {
                let breakdown = estimator
                    .estimate(&request(1234.5, floors, tier), &reference)
                    .unwrap();
                let sum: f64 = breakdown.components().iter().map(|(_, v)| v).sum();
                assert_close(breakdown.total_cost, sum);
                assert_close(
                    breakdown.development_cost_per_sqft,
                    breakdown.total_cost / 1234.5,
                );
            }
        }
    }

    #[test]
    fn test_doubling_area_doubles_area_proportional_components() {
        let estimator = CostEstimator::default();
        let reference = seeded_reference_data();

        let single = estimator
            .estimate(&request(900.0, 2, Tier::Medium), &reference)
            .unwrap();
        let double = estimator
            .estimate(&request(1800.0, 2, Tier::Medium), &reference)
            .unwrap();

        assert_close(double.standard_materials, 2.0 * single.standard_materials);
        assert_close(double.quality_materials, 2.0 * single.quality_materials);
        assert_close(
            double.electrical_components,
            2.0 * single.electrical_components,
        );
        assert_close(double.labor_cost, 2.0 * single.labor_cost);
        assert_close(
            double.development_cost_per_sqft,
            single.development_cost_per_sqft,
        );
    }

    #[test]
    fn test_missing_tier_is_an_error_not_zero() {
        let estimator = CostEstimator::default();
        let mut reference = seeded_reference_data();
        reference
            .quality_materials
            .retain(|row| !(row.material == "Steel" && row.quality == Tier::Low));

        let err = estimator
            .estimate(&request(1000.0, 1, Tier::Low), &reference)
            .unwrap_err();

        assert!(matches!(
            err,
            CostError::MissingTierRate { ref material, tier: Tier::Low } if material == "Steel"
        ));
    }

    #[test]
    fn test_unknown_material_is_missing_quantity() {
        let estimator = CostEstimator::default();
        let mut req = request(1000.0, 1, Tier::High);
        req.quality_selections.insert("Marble".to_string(), Tier::High);

        let mut reference = seeded_reference_data();
        reference.quality_materials.push(crate::models::QualityMaterial {
            id: uuid::Uuid::now_v7(),
            material: "Marble".to_string(),
            quality: Tier::High,
            rate: 900.0,
            updated_at: chrono::Utc::now(),
        });

        let err = estimator.estimate(&req, &reference).unwrap_err();
        assert!(matches!(err, CostError::MissingQuantity { .. }));
    }

    #[test]
    fn test_non_positive_area_is_invalid() {
        let estimator = CostEstimator::default();
        for area in [0.0, -10.0, f64::NAN] {
            let err = estimator
                .estimate(&request(area, 1, Tier::High), &seeded_reference_data())
                .unwrap_err();
            assert!(matches!(err, CostError::InvalidArea(_)), "area={area}");
        }
    }

    #[test]
    fn test_marla_input_is_converted() {
        let estimator = CostEstimator::default();
        let reference = seeded_reference_data();

        let mut marla = request(4.0, 1, Tier::High);
        marla.area_unit = AreaUnit::Marla;
        let sqft = request(900.0, 1, Tier::High);

        let a = estimator.estimate(&marla, &reference).unwrap();
        let b = estimator.estimate(&sqft, &reference).unwrap();
        assert_close(a.total_cost, b.total_cost);
        assert_close(a.development_cost_per_sqft, b.development_cost_per_sqft);
    }

    #[test]
    fn test_only_selected_materials_are_charged() {
        let estimator = CostEstimator::default();
        let mut req = request(1000.0, 1, Tier::High);
        req.quality_selections = BTreeMap::from([("Cement".to_string(), Tier::High)]);

        let breakdown = estimator.estimate(&req, &seeded_reference_data()).unwrap();
        // 1510 × 0.54 × 880
        assert_close(breakdown.quality_materials, 717_552.0);
        // Electrical falls back to Medium: 2090 × 880
        assert_close(breakdown.electrical_components, 1_839_200.0);
    }

    #[test]
    fn test_policy_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "COST_COVERAGE_FACTOR",
                "COST_LABOR_RATE_PER_SQFT",
                "COST_FINISHING_HIGH",
                "COST_FINISHING_MEDIUM",
                "COST_FINISHING_LOW",
            ],
            || {
                let policy = EstimatorPolicy::from_env().unwrap();
                assert_eq!(policy, EstimatorPolicy::default());
            },
        );
    }

    #[test]
    fn test_policy_from_env_overrides_and_rejects() {
        temp_env::with_vars(
            [
                ("COST_COVERAGE_FACTOR", Some("0.75")),
                ("COST_LABOR_RATE_PER_SQFT", Some("500")),
            ],
            || {
                let policy = EstimatorPolicy::from_env().unwrap();
                assert_eq!(policy.coverage_factor, 0.75);
                assert_eq!(policy.labor_rate_per_sqft, 500.0);
            },
        );

        temp_env::with_var("COST_COVERAGE_FACTOR", Some("1.5"), || {
            assert!(matches!(
                EstimatorPolicy::from_env(),
                Err(ConfigError::Invalid { .. })
            ));
        });

        temp_env::with_var("COST_FINISHING_LOW", Some("-0.1"), || {
            assert!(matches!(
                EstimatorPolicy::from_env(),
                Err(ConfigError::Invalid { .. })
            ));
        });
    }
}
