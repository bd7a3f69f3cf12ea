pub use sea_orm_migration::prelude::*;

mod m20250110_000000_create_reference_tables;
mod m20250110_000001_create_societies;
mod m20250110_000002_seed_reference_data;
mod m20250110_000003_create_engagement_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250110_000000_create_reference_tables::Migration),
            Box::new(m20250110_000001_create_societies::Migration),
            Box::new(m20250110_000002_seed_reference_data::Migration),
            Box::new(m20250110_000003_create_engagement_tables::Migration),
        ]
    }
}
