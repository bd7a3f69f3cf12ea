use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Societies::Table)
                    .if_not_exists()
                    .col(pk_uuid(Societies::Id))
                    .col(string_len(Societies::Name, 255))
                    .col(string_len(Societies::City, 100))
                    // (0, 0) means the coordinates were never set
                    .col(double(Societies::Latitude).default(0.0))
                    .col(double(Societies::Longitude).default(0.0))
                    .col(
                        timestamp_with_time_zone(Societies::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Societies::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_societies_city_name")
                    .table(Societies::Table)
                    .col(Societies::City)
                    .col(Societies::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER societies_touch_updated_at
                    BEFORE UPDATE ON societies
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Societies::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Societies {
    Table,
    Id,
    Name,
    City,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
