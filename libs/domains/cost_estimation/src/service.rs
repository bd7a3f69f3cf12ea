use observability::EstimateMetrics;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CostError, CostResult};
use crate::estimator::CostEstimator;
use crate::models::{
    CostBreakdown, ElectricalCost, EstimateRequest, QualityMaterial, QualityMaterialQuantity,
    ReferenceData, StandardMaterial, UpdateQuantity, UpdateRate, UpdateStandardMaterial,
};
use crate::repository::ReferenceDataRepository;

/// Cost estimates and reference data maintenance
#[derive(Clone)]
pub struct CostEstimationService<R: ReferenceDataRepository> {
    repository: Arc<R>,
    estimator: CostEstimator,
}

fn validate(input: &impl Validate) -> CostResult<()> {
    input
        .validate()
        .map_err(|e| CostError::InvalidInput(e.to_string()))
}

impl<R: ReferenceDataRepository> CostEstimationService<R> {
    pub fn new(repository: R, estimator: CostEstimator) -> Self {
        Self {
            repository: Arc::new(repository),
            estimator,
        }
    }

    /// Estimate against the reference tables as they are right now
    pub async fn estimate(&self, request: EstimateRequest) -> CostResult<CostBreakdown> {
        let started = Instant::now();
        let result = self.estimate_inner(&request).await;

        match &result {
            Ok(breakdown) => {
                EstimateMetrics::record_estimate("ok", started.elapsed());
                tracing::info!(
                    area_sqft = request.area_sqft,
                    num_floors = request.num_floors,
                    total_cost = breakdown.total_cost,
                    "Cost estimate computed"
                );
            }
            Err(e) => {
                EstimateMetrics::record_estimate(e.outcome(), started.elapsed());
                tracing::warn!(error = %e, "Cost estimate failed");
            }
        }

        result
    }

    async fn estimate_inner(&self, request: &EstimateRequest) -> CostResult<CostBreakdown> {
        let reference = self.repository.snapshot().await?;
        self.estimator.estimate(request, &reference)
    }

    pub async fn reference_data(&self) -> CostResult<ReferenceData> {
        self.repository.snapshot().await
    }

    pub async fn list_standard_materials(&self) -> CostResult<Vec<StandardMaterial>> {
        Ok(self.repository.snapshot().await?.standard_materials)
    }

    pub async fn list_quality_materials(&self) -> CostResult<Vec<QualityMaterial>> {
        Ok(self.repository.snapshot().await?.quality_materials)
    }

    pub async fn list_quality_material_quantities(
        &self,
    ) -> CostResult<Vec<QualityMaterialQuantity>> {
        Ok(self.repository.snapshot().await?.quality_material_quantities)
    }

    pub async fn list_electrical_costs(&self) -> CostResult<Vec<ElectricalCost>> {
        Ok(self.repository.snapshot().await?.electrical_costs)
    }

    pub async fn get_standard_material(&self, id: Uuid) -> CostResult<StandardMaterial> {
        self.repository
            .get_standard_material(id)
            .await?
            .ok_or(CostError::NotFound {
                table: "Standard material",
                id,
            })
    }

    pub async fn get_quality_material(&self, id: Uuid) -> CostResult<QualityMaterial> {
        self.repository
            .get_quality_material(id)
            .await?
            .ok_or(CostError::NotFound {
                table: "Quality material",
                id,
            })
    }

    pub async fn get_quality_material_quantity(
        &self,
        id: Uuid,
    ) -> CostResult<QualityMaterialQuantity> {
        self.repository
            .get_quality_material_quantity(id)
            .await?
            .ok_or(CostError::NotFound {
                table: "Quality material quantity",
                id,
            })
    }

    pub async fn get_electrical_cost(&self, id: Uuid) -> CostResult<ElectricalCost> {
        self.repository
            .get_electrical_cost(id)
            .await?
            .ok_or(CostError::NotFound {
                table: "Electrical cost",
                id,
            })
    }

    pub async fn update_standard_material(
        &self,
        id: Uuid,
        input: UpdateStandardMaterial,
    ) -> CostResult<StandardMaterial> {
        validate(&input)?;
        self.repository.update_standard_material(id, input).await
    }

    pub async fn update_quality_material(
        &self,
        id: Uuid,
        input: UpdateRate,
    ) -> CostResult<QualityMaterial> {
        validate(&input)?;
        self.repository
            .update_quality_material_rate(id, input.rate)
            .await
    }

    pub async fn update_quality_material_quantity(
        &self,
        id: Uuid,
        input: UpdateQuantity,
    ) -> CostResult<QualityMaterialQuantity> {
        validate(&input)?;
        self.repository
            .update_quality_material_quantity(id, input.quantity)
            .await
    }

    pub async fn update_electrical_cost(
        &self,
        id: Uuid,
        input: UpdateRate,
    ) -> CostResult<ElectricalCost> {
        validate(&input)?;
        self.repository
            .update_electrical_cost_rate(id, input.rate)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AreaUnit, Tier};
    use crate::repository::{MockReferenceDataRepository, seeded_reference_data};
    use std::collections::BTreeMap;

    fn request() -> EstimateRequest {
        EstimateRequest {
            area_sqft: 1000.0,
            area_unit: AreaUnit::Sqft,
            num_floors: 1,
            quality_selections: BTreeMap::from([("Cement".to_string(), Tier::High)]),
            electrical_quality: Some(Tier::High),
            finishing_touch_quality: None,
        }
    }

    #[tokio::test]
    async fn test_estimate_reads_one_snapshot() {
        let mut mock_repo = MockReferenceDataRepository::new();
        mock_repo
            .expect_snapshot()
            .times(1)
            .returning(|| Ok(seeded_reference_data()));

        let service = CostEstimationService::new(mock_repo, CostEstimator::default());
        let breakdown = service.estimate(request()).await.unwrap();

        assert_eq!(breakdown.covered_area, 1000.0 * 0.88);
    }

    #[tokio::test]
    async fn test_estimate_propagates_store_failure() {
        let mut mock_repo = MockReferenceDataRepository::new();
        mock_repo.expect_snapshot().returning(|| {
            Err(CostError::ReferenceDataUnavailable(sea_orm::DbErr::Custom(
                "pool timed out".to_string(),
            )))
        });

        let service = CostEstimationService::new(mock_repo, CostEstimator::default());
        let err = service.estimate(request()).await.unwrap_err();

        assert!(matches!(err, CostError::ReferenceDataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_negative_rate_is_rejected_before_the_store() {
        let mut mock_repo = MockReferenceDataRepository::new();
        mock_repo.expect_update_quality_material_rate().never();

        let service = CostEstimationService::new(mock_repo, CostEstimator::default());
        let err = service
            .update_quality_material(Uuid::now_v7(), UpdateRate { rate: -1.0 })
            .await
            .unwrap_err();

        assert!(matches!(err, CostError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_row_is_not_found() {
        let mut mock_repo = MockReferenceDataRepository::new();
        mock_repo
            .expect_get_electrical_cost()
            .returning(|_| Ok(None));

        let service = CostEstimationService::new(mock_repo, CostEstimator::default());
        let err = service
            .get_electrical_cost(Uuid::now_v7())
            .await
            .unwrap_err();

        assert!(matches!(err, CostError::NotFound { .. }));
    }
}
