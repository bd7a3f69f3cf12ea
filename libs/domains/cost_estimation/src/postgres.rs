use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::{
    electrical_cost, quality_material, quality_material_quantity, standard_material,
};
use crate::error::{CostError, CostResult};
use crate::models::{
    ElectricalCost, QualityMaterial, QualityMaterialQuantity, ReferenceData, StandardMaterial,
    UpdateStandardMaterial,
};
use crate::repository::ReferenceDataRepository;

/// PostgreSQL implementation of ReferenceDataRepository
#[derive(Clone)]
pub struct PgReferenceDataRepository {
    db: DatabaseConnection,
}

impl PgReferenceDataRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReferenceDataRepository for PgReferenceDataRepository {
    async fn snapshot(&self) -> CostResult<ReferenceData> {
        let (standard, quality, quantities, electrical) = tokio::try_join!(
            standard_material::Entity::find()
                .order_by_asc(standard_material::Column::Material)
                .all(&self.db),
            quality_material::Entity::find()
                .order_by_asc(quality_material::Column::Material)
                .order_by_asc(quality_material::Column::Quality)
                .all(&self.db),
            quality_material_quantity::Entity::find()
                .order_by_asc(quality_material_quantity::Column::Material)
                .all(&self.db),
            electrical_cost::Entity::find()
                .order_by_asc(electrical_cost::Column::Quality)
                .order_by_asc(electrical_cost::Column::Item)
                .all(&self.db),
        )?;

        Ok(ReferenceData {
            standard_materials: standard.into_iter().map(Into::into).collect(),
            quality_materials: quality.into_iter().map(Into::into).collect(),
            quality_material_quantities: quantities.into_iter().map(Into::into).collect(),
            electrical_costs: electrical.into_iter().map(Into::into).collect(),
        })
    }

    async fn get_standard_material(&self, id: Uuid) -> CostResult<Option<StandardMaterial>> {
        let result = standard_material::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn get_quality_material(&self, id: Uuid) -> CostResult<Option<QualityMaterial>> {
        let result = quality_material::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn get_quality_material_quantity(
        &self,
        id: Uuid,
    ) -> CostResult<Option<QualityMaterialQuantity>> {
        let result = quality_material_quantity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn get_electrical_cost(&self, id: Uuid) -> CostResult<Option<ElectricalCost>> {
        let result = electrical_cost::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn update_standard_material(
        &self,
        id: Uuid,
        input: UpdateStandardMaterial,
    ) -> CostResult<StandardMaterial> {
        let existing = standard_material::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CostError::NotFound {
                table: "Standard material",
                id,
            })?;

        let mut model: standard_material::ActiveModel = existing.into();
        if let Some(rate) = input.rate {
            model.rate = Set(rate);
        }
        if let Some(quantity) = input.quantity {
            model.quantity = Set(quantity);
        }
        model.updated_at = Set(Utc::now().into());

        let result = model.update(&self.db).await?.into();
        Ok(result)
    }

    async fn update_quality_material_rate(
        &self,
        id: Uuid,
        rate: f64,
    ) -> CostResult<QualityMaterial> {
        let existing = quality_material::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CostError::NotFound {
                table: "Quality material",
                id,
            })?;

        let mut model: quality_material::ActiveModel = existing.into();
        model.rate = Set(rate);
        model.updated_at = Set(Utc::now().into());

        let result = model.update(&self.db).await?.into();
        Ok(result)
    }

    async fn update_quality_material_quantity(
        &self,
        id: Uuid,
        quantity: f64,
    ) -> CostResult<QualityMaterialQuantity> {
        let existing = quality_material_quantity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CostError::NotFound {
                table: "Quality material quantity",
                id,
            })?;

        let mut model: quality_material_quantity::ActiveModel = existing.into();
        model.quantity = Set(quantity);
        model.updated_at = Set(Utc::now().into());

        let result = model.update(&self.db).await?.into();
        Ok(result)
    }

    async fn update_electrical_cost_rate(&self, id: Uuid, rate: f64) -> CostResult<ElectricalCost> {
        let existing = electrical_cost::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CostError::NotFound {
                table: "Electrical cost",
                id,
            })?;

        let mut model: electrical_cost::ActiveModel = existing.into();
        model.rate = Set(rate);
        model.updated_at = Set(Utc::now().into());

        let result = model.update(&self.db).await?.into();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    #[tokio::test]
    async fn test_store_failure_surfaces_as_reference_data_unavailable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgReferenceDataRepository::new(db);

        let err = repo.get_standard_material(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, CostError::ReferenceDataUnavailable(_)));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<electrical_cost::Model>::new()])
            .into_connection();
        let repo = PgReferenceDataRepository::new(db);

        let err = repo
            .update_electrical_cost_rate(Uuid::now_v7(), 10.0)
            .await
            .unwrap_err();
        assert!(matches!(err, CostError::NotFound { .. }));
    }
}
