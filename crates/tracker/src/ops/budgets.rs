use std::collections::HashMap;

use sea_orm::{
    ActiveValue, QueryFilter, TransactionTrait, prelude::*, sea_query::OnConflict,
};
use uuid::Uuid;

use crate::{Budget, MoneyCents, ResultTracker, TrackerError, budgets};

use super::{Tracker, month_bounds, with_tx};

impl Tracker {
    /// Set the budget for `(owner, category, year, month)`, overwriting any
    /// previous amount.
    ///
    /// The upsert is a single `INSERT ... ON CONFLICT DO UPDATE` against the
    /// declared unique index, so two concurrent upserts for the same key
    /// leave exactly one row holding the later amount.
    pub async fn upsert_budget(
        &self,
        owner: &str,
        category_id: Uuid,
        amount: MoneyCents,
        year: i32,
        month: u32,
    ) -> ResultTracker<Budget> {
        if amount.is_negative() {
            return Err(TrackerError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }
        // Validates the period as well.
        month_bounds(year, month)?;

        with_tx!(self, |db_tx| {
            self.require_category(&db_tx, owner, category_id).await?;

            let active = budgets::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                username: ActiveValue::Set(owner.to_string()),
                category_id: ActiveValue::Set(category_id),
                amount_cents: ActiveValue::Set(amount.cents()),
                year: ActiveValue::Set(year),
                month: ActiveValue::Set(month as i32),
            };

            budgets::Entity::insert(active)
                .on_conflict(
                    OnConflict::columns([
                        budgets::Column::Username,
                        budgets::Column::CategoryId,
                        budgets::Column::Year,
                        budgets::Column::Month,
                    ])
                    .update_column(budgets::Column::AmountCents)
                    .to_owned(),
                )
                .exec(&db_tx)
                .await?;

            let model = budgets::Entity::find()
                .filter(budgets::Column::Username.eq(owner))
                .filter(budgets::Column::CategoryId.eq(category_id))
                .filter(budgets::Column::Year.eq(year))
                .filter(budgets::Column::Month.eq(month as i32))
                .one(&db_tx)
                .await?
                .ok_or_else(|| TrackerError::KeyNotFound("budget not exists".to_string()))?;

            Ok(model.into())
        })
    }

    /// Budgeted amount per category for the period.
    ///
    /// Categories without a budget for the period are absent from the map,
    /// not zero-filled.
    pub async fn budgets(
        &self,
        owner: &str,
        year: i32,
        month: u32,
    ) -> ResultTracker<HashMap<Uuid, MoneyCents>> {
        month_bounds(year, month)?;

        let models = budgets::Entity::find()
            .filter(budgets::Column::Username.eq(owner))
            .filter(budgets::Column::Year.eq(year))
            .filter(budgets::Column::Month.eq(month as i32))
            .all(&self.database)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| (model.category_id, MoneyCents::new(model.amount_cents)))
            .collect())
    }
}
