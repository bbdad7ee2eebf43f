use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{Income, NewIncome, ResultTracker, TrackerError, incomes};

use super::{Tracker, normalize_optional_text, normalize_required_name};

impl Tracker {
    /// Record an income for `owner`.
    pub async fn create_income(&self, owner: &str, fields: NewIncome) -> ResultTracker<Income> {
        let source = normalize_required_name(&fields.source, "source")?;
        if !fields.amount.is_positive() {
            return Err(TrackerError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }

        let model = incomes::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            username: ActiveValue::Set(owner.to_string()),
            source: ActiveValue::Set(source),
            amount_cents: ActiveValue::Set(fields.amount.cents()),
            description: ActiveValue::Set(normalize_optional_text(fields.description.as_deref())),
            date: ActiveValue::Set(fields.date),
        }
        .insert(&self.database)
        .await?;

        Ok(model.into())
    }

    /// List the owner's incomes, newest date first, ties by id ascending.
    ///
    /// The ordering matches [`Tracker::list_expenses`] so both ledgers read
    /// the same way.
    pub async fn list_incomes(&self, owner: &str) -> ResultTracker<Vec<Income>> {
        let models = incomes::Entity::find()
            .filter(incomes::Column::Username.eq(owner))
            .order_by_desc(incomes::Column::Date)
            .order_by_asc(incomes::Column::Id)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Income::from).collect())
    }
}
