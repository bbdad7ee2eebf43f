//! Income ledger rows.
//!
//! Incomes carry a free-text source instead of a category.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub source: String,
    pub amount_cents: i64,
    pub description: Option<String>,
    pub date: Date,
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

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: Uuid,
    pub source: String,
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl From<Model> for Income {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            source: model.source,
            amount: MoneyCents::new(model.amount_cents),
            description: model.description,
            date: model.date,
        }
    }
}

/// Fields accepted when recording an income.
#[derive(Clone, Debug)]
pub struct NewIncome {
    pub source: String,
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub date: NaiveDate,
}
