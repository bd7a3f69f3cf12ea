use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(
            r#"
            INSERT INTO standard_materials (id, material, rate, quantity)
            VALUES
                (gen_random_uuid(), '25 mm o/d Pipe', 19.38, 0.181),
                (gen_random_uuid(), '32 mm o/d Pipe', 6.01, 0.072),
                (gen_random_uuid(), '40 mm o/d Pipe', 4.73, 0.018),
                (gen_random_uuid(), '50 mm o/d Pipe', 8.96, 0.022),
                (gen_random_uuid(), '32 mm o/d Insulation', 5.83, 0.035),
                (gen_random_uuid(), '50 mm o/d Insulation', 13.71, 0.022),
                (gen_random_uuid(), '2" Dia Pipe', 19.20, 0.072),
                (gen_random_uuid(), '3" Dia Pipe', 25.72, 0.072),
                (gen_random_uuid(), '4" Dia Pipe', 18.86, 0.108),
                (gen_random_uuid(), 'GI Welded Pipeline 3/4” i/d', 56.04, 0.135),
                (gen_random_uuid(), 'Gas Cock 3/4" i/d', 2.48, 0.002),
                (gen_random_uuid(), 'Floor Drains', 9.53, 0.006),
                (gen_random_uuid(), '1" dia Class "E" Pipe', 13.39, 0.122),
                (gen_random_uuid(), '6" dia Class "B" Pipe', 31.84, 0.045),
                (gen_random_uuid(), 'Roof Insulation', 246.00, 0.129),
                (gen_random_uuid(), 'Termite Proofing', 1600.00, 0.004),
                (gen_random_uuid(), 'Water Proofing', 114.00, 0.129),
                (gen_random_uuid(), 'Excavation & Backfill + Ghassu', 23.00, 3.284)
            ON CONFLICT DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO quality_materials (id, material, quality, rate)
            VALUES
                (gen_random_uuid(), 'Cement', 'High', 1510),
                (gen_random_uuid(), 'Cement', 'Medium', 1205),
                (gen_random_uuid(), 'Cement', 'Low', 1095),
                (gen_random_uuid(), 'Bricks', 'High', 22),
                (gen_random_uuid(), 'Bricks', 'Medium', 16),
                (gen_random_uuid(), 'Bricks', 'Low', 12),
                (gen_random_uuid(), 'Steel', 'High', 280),
                (gen_random_uuid(), 'Steel', 'Medium', 276),
                (gen_random_uuid(), 'Steel', 'Low', 272),
                (gen_random_uuid(), 'Sand', 'High', 110),
                (gen_random_uuid(), 'Sand', 'Medium', 60),
                (gen_random_uuid(), 'Sand', 'Low', 44),
                (gen_random_uuid(), 'Aggregate', 'High', 150),
                (gen_random_uuid(), 'Aggregate', 'Medium', 120),
                (gen_random_uuid(), 'Aggregate', 'Low', 80)
            ON CONFLICT DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO quality_material_quantities (id, material, quantity)
            VALUES
                (gen_random_uuid(), 'Bricks', 50.01),
                (gen_random_uuid(), 'Cement', 0.54),
                (gen_random_uuid(), 'Sand', 2.69),
                (gen_random_uuid(), 'Aggregate', 1.53),
                (gen_random_uuid(), 'Steel', 2.96)
            ON CONFLICT DO NOTHING
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            INSERT INTO electrical_costs (id, item, quality, rate)
            VALUES
                (gen_random_uuid(), 'Switch Boards', 'High', 1500),
                (gen_random_uuid(), '3/4” dia. Electrical PVC Conduit', 'High', 35),
                (gen_random_uuid(), '1” dia. Electrical PVC Conduit', 'High', 38),
                (gen_random_uuid(), '1.5” dia. Electrical PVC Conduit', 'High', 45),
                (gen_random_uuid(), '2” dia. Electrical PVC Conduit', 'High', 55),
                (gen_random_uuid(), 'PVC Ceiling Fan Hook', 'High', 600),
                (gen_random_uuid(), 'Switch Boards', 'Medium', 1390),
                (gen_random_uuid(), '3/4” dia. Electrical PVC Conduit', 'Medium', 30),
                (gen_random_uuid(), '1” dia. Electrical PVC Conduit', 'Medium', 32),
                (gen_random_uuid(), '1.5” dia. Electrical PVC Conduit', 'Medium', 41),
                (gen_random_uuid(), '2” dia. Electrical PVC Conduit', 'Medium', 50),
                (gen_random_uuid(), 'PVC Ceiling Fan Hook', 'Medium', 547),
                (gen_random_uuid(), 'Switch Boards', 'Low', 1200),
                (gen_random_uuid(), '3/4” dia. Electrical PVC Conduit', 'Low', 25),
                (gen_random_uuid(), '1” dia. Electrical PVC Conduit', 'Low', 28),
                (gen_random_uuid(), '1.5” dia. Electrical PVC Conduit', 'Low', 37),
                (gen_random_uuid(), '2” dia. Electrical PVC Conduit', 'Low', 45),
                (gen_random_uuid(), 'PVC Ceiling Fan Hook', 'Low', 500)
            ON CONFLICT DO NOTHING
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "TRUNCATE electrical_costs, quality_material_quantities, quality_materials, standard_materials",
            )
            .await?;

        Ok(())
    }
}
