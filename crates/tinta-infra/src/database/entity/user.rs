//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub city: String,
    pub date_of_birth: Option<Date>,
    pub password_hash: String,
    pub avatar: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub about: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post::Entity")]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for tinta_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            last_name: model.last_name,
            first_name: model.first_name,
            username: model.username,
            email: model.email,
            phone: model.phone,
            city: model.city,
            date_of_birth: model.date_of_birth,
            password_hash: model.password_hash,
            avatar: model.avatar,
            about: model.about,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<tinta_core::domain::User> for ActiveModel {
    fn from(user: tinta_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            last_name: Set(user.last_name),
            first_name: Set(user.first_name),
            username: Set(user.username),
            email: Set(user.email),
            phone: Set(user.phone),
            city: Set(user.city),
            date_of_birth: Set(user.date_of_birth),
            password_hash: Set(user.password_hash),
            avatar: Set(user.avatar),
            about: Set(user.about),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}
