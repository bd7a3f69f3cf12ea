use crate::models::Tier;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "electrical_costs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub item: String,
    pub quality: Tier,
    /// Per unit of covered area
    pub rate: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::ElectricalCost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            item: model.item,
            quality: model.quality,
            rate: model.rate,
            updated_at: model.updated_at.into(),
        }
    }
}
