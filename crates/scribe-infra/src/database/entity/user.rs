//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for scribe_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
        }
    }
}

impl From<scribe_core::domain::User> for ActiveModel {
    fn from(user: scribe_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at.into()),
        }
    }
}
