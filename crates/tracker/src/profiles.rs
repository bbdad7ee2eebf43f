//! One-to-one user profiles.
//!
//! A profile row exists for every user: it is inserted in the same database
//! transaction that creates the user.

use sea_orm::entity::prelude::*;

/// Picture path used when the user never uploaded one.
pub const DEFAULT_PICTURE: &str = "profile_pics/default.png";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    pub picture: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Username",
        to = "super::users::Column::Username",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Profile view with the picture defaulted to the placeholder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub picture: String,
}

impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Self {
            username: model.username,
            picture: model.picture.unwrap_or_else(|| DEFAULT_PICTURE.to_string()),
        }
    }
}
