use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "society_reviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub society_id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub user_name: String,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::SocietyReview {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            society_id: model.society_id,
            user_id: model.user_id,
            user_name: model.user_name,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::SocietyReview> for ActiveModel {
    fn from(review: crate::models::SocietyReview) -> Self {
        use sea_orm::Set;
        Self {
            id: Set(review.id),
            society_id: Set(review.society_id),
            user_id: Set(review.user_id),
            user_name: Set(review.user_name),
            rating: Set(review.rating),
            comment: Set(review.comment),
            created_at: Set(review.created_at.into()),
        }
    }
}
