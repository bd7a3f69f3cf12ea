use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "societies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Society {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            latitude: model.latitude,
            longitude: model.longitude,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<crate::models::Society> for ActiveModel {
    fn from(society: crate::models::Society) -> Self {
        use sea_orm::Set;
        Self {
            id: Set(society.id),
            name: Set(society.name),
            city: Set(society.city),
            latitude: Set(society.latitude),
            longitude: Set(society.longitude),
            created_at: Set(society.created_at.into()),
            updated_at: Set(society.updated_at.into()),
        }
    }
}
