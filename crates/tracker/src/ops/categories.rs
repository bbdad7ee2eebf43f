use sea_orm::{ActiveValue, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Category, ResultTracker, TrackerError, categories, expenses};

use super::{Tracker, normalize_required_name, with_tx};

impl Tracker {
    /// Create a category for `owner`.
    ///
    /// Fails with [`TrackerError::ExistingKey`] when the owner already has a
    /// category with that name.
    pub async fn create_category(&self, owner: &str, name: &str) -> ResultTracker<Category> {
        let name = normalize_required_name(name, "category name")?;

        with_tx!(self, |db_tx| {
            let duplicate = categories::Entity::find()
                .filter(categories::Column::Username.eq(owner))
                .filter(categories::Column::Name.eq(name.clone()))
                .one(&db_tx)
                .await?;
            if duplicate.is_some() {
                return Err(TrackerError::ExistingKey(name.clone()));
            }

            let id = Uuid::new_v4();
            categories::ActiveModel {
                id: ActiveValue::Set(id),
                username: ActiveValue::Set(owner.to_string()),
                name: ActiveValue::Set(name.clone()),
            }
            .insert(&db_tx)
            .await?;

            Ok(Category { id, name })
        })
    }

    /// List the owner's categories ordered by name.
    pub async fn list_categories(&self, owner: &str) -> ResultTracker<Vec<Category>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Username.eq(owner))
            .order_by_asc(categories::Column::Name)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Category::from).collect())
    }

    /// Delete a category owned by `owner`.
    ///
    /// Restrict-on-delete: fails with [`TrackerError::InUse`] while any
    /// expense still references the category. A category that is absent or
    /// owned by someone else is reported as not found.
    pub async fn delete_category(&self, category_id: Uuid, owner: &str) -> ResultTracker<()> {
        with_tx!(self, |db_tx| {
            let model = categories::Entity::find_by_id(category_id)
                .filter(categories::Column::Username.eq(owner))
                .one(&db_tx)
                .await?
                .ok_or_else(|| TrackerError::KeyNotFound("category not exists".to_string()))?;

            let referencing = expenses::Entity::find()
                .filter(expenses::Column::CategoryId.eq(category_id))
                .count(&db_tx)
                .await?;
            if referencing > 0 {
                return Err(TrackerError::InUse(model.name));
            }

            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
