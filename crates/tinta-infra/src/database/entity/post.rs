//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub cover: String,
    pub published_at: DateTimeWithTimeZone,
    pub user_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for tinta_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            cover: model.cover,
            published_at: model.published_at.into(),
            user_id: model.user_id,
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<tinta_core::domain::Post> for ActiveModel {
    fn from(post: tinta_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            description: Set(post.description),
            cover: Set(post.cover),
            published_at: Set(post.published_at.into()),
            user_id: Set(post.user_id),
        }
    }
}
