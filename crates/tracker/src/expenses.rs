//! Expense ledger rows.
//!
//! An expense always references a category owned by the same user; the
//! operations layer checks that inside the write transaction.

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MoneyCents;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub category_id: Uuid,
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
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Expense as seen by callers, with the category name resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub category_id: Uuid,
    pub category_name: String,
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl Expense {
    pub(crate) fn from_model(model: Model, category_name: String) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            category_name,
            amount: MoneyCents::new(model.amount_cents),
            description: model.description,
            date: model.date,
        }
    }
}

/// Fields accepted when creating or updating an expense.
#[derive(Clone, Debug)]
pub struct ExpenseFields {
    pub category_id: Uuid,
    pub amount: MoneyCents,
    pub description: Option<String>,
    pub date: NaiveDate,
}
