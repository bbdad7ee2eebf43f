use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    Expense, ExpenseFields, MoneyCents, ResultTracker, TrackerError, categories, expenses,
};

use super::{Tracker, normalize_optional_text, with_tx};

fn require_positive(amount: MoneyCents) -> ResultTracker<()> {
    if !amount.is_positive() {
        return Err(TrackerError::InvalidAmount(
            "amount must be > 0".to_string(),
        ));
    }
    Ok(())
}

impl Tracker {
    /// Returns the category model if it exists and belongs to `owner`.
    ///
    /// A category owned by someone else is reported as not found so its
    /// existence does not leak.
    pub(super) async fn require_category(
        &self,
        db_tx: &DatabaseTransaction,
        owner: &str,
        category_id: Uuid,
    ) -> ResultTracker<categories::Model> {
        categories::Entity::find_by_id(category_id)
            .filter(categories::Column::Username.eq(owner))
            .one(db_tx)
            .await?
            .ok_or_else(|| TrackerError::KeyNotFound("category not exists".to_string()))
    }

    /// Record an expense for `owner`.
    pub async fn create_expense(
        &self,
        owner: &str,
        fields: ExpenseFields,
    ) -> ResultTracker<Expense> {
        require_positive(fields.amount)?;

        with_tx!(self, |db_tx| {
            let category = self
                .require_category(&db_tx, owner, fields.category_id)
                .await?;

            let model = expenses::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                username: ActiveValue::Set(owner.to_string()),
                category_id: ActiveValue::Set(fields.category_id),
                amount_cents: ActiveValue::Set(fields.amount.cents()),
                description: ActiveValue::Set(normalize_optional_text(
                    fields.description.as_deref(),
                )),
                date: ActiveValue::Set(fields.date),
            }
            .insert(&db_tx)
            .await?;

            Ok(Expense::from_model(model, category.name))
        })
    }

    /// Return one expense owned by `owner`.
    pub async fn expense(&self, expense_id: Uuid, owner: &str) -> ResultTracker<Expense> {
        let (model, category) = expenses::Entity::find_by_id(expense_id)
            .filter(expenses::Column::Username.eq(owner))
            .find_also_related(categories::Entity)
            .one(&self.database)
            .await?
            .ok_or_else(|| TrackerError::KeyNotFound("expense not exists".to_string()))?;

        let category_name = category.map(|c| c.name).unwrap_or_default();
        Ok(Expense::from_model(model, category_name))
    }

    /// Replace date, category, amount and description of an expense.
    ///
    /// Same validation as create; on failure the stored row is untouched.
    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        owner: &str,
        fields: ExpenseFields,
    ) -> ResultTracker<Expense> {
        require_positive(fields.amount)?;

        with_tx!(self, |db_tx| {
            expenses::Entity::find_by_id(expense_id)
                .filter(expenses::Column::Username.eq(owner))
                .one(&db_tx)
                .await?
                .ok_or_else(|| TrackerError::KeyNotFound("expense not exists".to_string()))?;

            let category = self
                .require_category(&db_tx, owner, fields.category_id)
                .await?;

            let model = expenses::ActiveModel {
                id: ActiveValue::Set(expense_id),
                category_id: ActiveValue::Set(fields.category_id),
                amount_cents: ActiveValue::Set(fields.amount.cents()),
                description: ActiveValue::Set(normalize_optional_text(
                    fields.description.as_deref(),
                )),
                date: ActiveValue::Set(fields.date),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            Ok(Expense::from_model(model, category.name))
        })
    }

    /// Delete an expense owned by `owner`.
    ///
    /// Fails with [`TrackerError::KeyNotFound`] when the row is absent or
    /// not owned; the HTTP layer turns that into an empty success to keep
    /// UI deletes idempotent.
    pub async fn delete_expense(&self, expense_id: Uuid, owner: &str) -> ResultTracker<()> {
        with_tx!(self, |db_tx| {
            expenses::Entity::find_by_id(expense_id)
                .filter(expenses::Column::Username.eq(owner))
                .one(&db_tx)
                .await?
                .ok_or_else(|| TrackerError::KeyNotFound("expense not exists".to_string()))?;

            expenses::Entity::delete_by_id(expense_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// List the owner's expenses, newest date first.
    ///
    /// Ties on the date are broken by id ascending so the order is stable.
    /// `limit` caps the result for summary views.
    pub async fn list_expenses(
        &self,
        owner: &str,
        limit: Option<u64>,
    ) -> ResultTracker<Vec<Expense>> {
        let mut query = expenses::Entity::find()
            .filter(expenses::Column::Username.eq(owner))
            .order_by_desc(expenses::Column::Date)
            .order_by_asc(expenses::Column::Id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        let rows = query
            .find_also_related(categories::Entity)
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(model, category)| {
                let category_name = category.map(|c| c.name).unwrap_or_default();
                Expense::from_model(model, category_name)
            })
            .collect())
    }
}
