use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // gen_random_uuid() for seed rows
        db.execute_unprepared("CREATE EXTENSION IF NOT EXISTS pgcrypto")
            .await?;
        db.execute_unprepared("CREATE SCHEMA IF NOT EXISTS util").await?;
        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION util.touch_updated_at()
            RETURNS TRIGGER AS $$
            BEGIN
                NEW.updated_at = NOW();
                RETURN NEW;
            END;
            $$ LANGUAGE plpgsql
            "#,
        )
        .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(QualityTier::Enum)
                    .values([QualityTier::High, QualityTier::Medium, QualityTier::Low])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StandardMaterials::Table)
                    .if_not_exists()
                    .col(pk_uuid(StandardMaterials::Id))
                    .col(string_len(StandardMaterials::Material, 255).unique_key())
                    .col(double(StandardMaterials::Rate))
                    .col(double(StandardMaterials::Quantity))
                    .col(
                        timestamp_with_time_zone(StandardMaterials::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(StandardMaterials::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QualityMaterials::Table)
                    .if_not_exists()
                    .col(pk_uuid(QualityMaterials::Id))
                    .col(string_len(QualityMaterials::Material, 255))
                    .col(tier_column(QualityMaterials::Quality))
                    .col(double(QualityMaterials::Rate))
                    .col(
                        timestamp_with_time_zone(QualityMaterials::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(QualityMaterials::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quality_materials_material_quality")
                    .table(QualityMaterials::Table)
                    .col(QualityMaterials::Material)
                    .col(QualityMaterials::Quality)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QualityMaterialQuantities::Table)
                    .if_not_exists()
                    .col(pk_uuid(QualityMaterialQuantities::Id))
                    .col(string_len(QualityMaterialQuantities::Material, 255).unique_key())
                    .col(double(QualityMaterialQuantities::Quantity))
                    .col(
                        timestamp_with_time_zone(QualityMaterialQuantities::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(QualityMaterialQuantities::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ElectricalCosts::Table)
                    .if_not_exists()
                    .col(pk_uuid(ElectricalCosts::Id))
                    .col(string_len(ElectricalCosts::Item, 255))
                    .col(tier_column(ElectricalCosts::Quality))
                    .col(double(ElectricalCosts::Rate))
                    .col(
                        timestamp_with_time_zone(ElectricalCosts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(ElectricalCosts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_electrical_costs_item_quality")
                    .table(ElectricalCosts::Table)
                    .col(ElectricalCosts::Item)
                    .col(ElectricalCosts::Quality)
                    .unique()
                    .to_owned(),
            )
            .await?;

        for table in [
            "standard_materials",
            "quality_materials",
            "quality_material_quantities",
            "electrical_costs",
        ] {
            db.execute_unprepared(&format!(
                "CREATE TRIGGER {table}_touch_updated_at \
                 BEFORE UPDATE ON {table} \
                 FOR EACH ROW EXECUTE FUNCTION util.touch_updated_at()"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ElectricalCosts::Table).to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(QualityMaterialQuantities::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(QualityMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StandardMaterials::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().name(QualityTier::Enum).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS util.touch_updated_at()")
            .await?;

        Ok(())
    }
}

fn tier_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .enumeration(
            QualityTier::Enum,
            [QualityTier::High, QualityTier::Medium, QualityTier::Low],
        )
        .not_null()
        .to_owned()
}

#[derive(DeriveIden)]
enum StandardMaterials {
    Table,
    Id,
    Material,
    Rate,
    Quantity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QualityMaterials {
    Table,
    Id,
    Material,
    Quality,
    Rate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QualityMaterialQuantities {
    Table,
    Id,
    Material,
    Quantity,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ElectricalCosts {
    Table,
    Id,
    Item,
    Quality,
    Rate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QualityTier {
    #[sea_orm(iden = "quality_tier")]
    Enum,
    #[sea_orm(iden = "High")]
    High,
    #[sea_orm(iden = "Medium")]
    Medium,
    #[sea_orm(iden = "Low")]
    Low,
}
