use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_searches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub user_name: String,
    pub society_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub society_name: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub city_name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::SearchRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            user_name: model.user_name,
            society_id: model.society_id,
            society_name: model.society_name,
            city_name: model.city_name,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::SearchRecord> for ActiveModel {
    fn from(record: crate::models::SearchRecord) -> Self {
        use sea_orm::Set;
        Self {
            id: Set(record.id),
            user_id: Set(record.user_id),
            user_name: Set(record.user_name),
            society_id: Set(record.society_id),
            society_name: Set(record.society_name),
            city_name: Set(record.city_name),
            created_at: Set(record.created_at.into()),
        }
    }
}
