use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{Profile, ResultTracker, TrackerError, profiles, users};

use super::{Tracker, normalize_required_name, with_tx};

impl Tracker {
    /// Create a user and its profile.
    ///
    /// The profile row is inserted in the same transaction: every user has
    /// exactly one profile, always, without relying on a reactive hook.
    pub async fn create_user(&self, username: &str, password: &str) -> ResultTracker<()> {
        let username = normalize_required_name(username, "username")?;
        if password.is_empty() {
            return Err(TrackerError::InvalidName(
                "password must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if users::Entity::find_by_id(username.as_str())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(TrackerError::ExistingKey(username.clone()));
            }

            users::ActiveModel {
                username: ActiveValue::Set(username.clone()),
                password: ActiveValue::Set(password.to_string()),
            }
            .insert(&db_tx)
            .await?;

            profiles::ActiveModel {
                username: ActiveValue::Set(username.clone()),
                picture: ActiveValue::Set(None),
            }
            .insert(&db_tx)
            .await?;

            Ok(())
        })
    }

    /// Return a user's profile, with the placeholder picture when unset.
    pub async fn profile(&self, username: &str) -> ResultTracker<Profile> {
        let model = profiles::Entity::find_by_id(username)
            .one(&self.database)
            .await?
            .ok_or_else(|| TrackerError::KeyNotFound("profile not exists".to_string()))?;
        Ok(model.into())
    }

    /// Update the profile picture path for the owning user.
    pub async fn set_profile_picture(&self, username: &str, picture: &str) -> ResultTracker<()> {
        let picture = normalize_required_name(picture, "picture")?;

        let model = profiles::Entity::find()
            .filter(profiles::Column::Username.eq(username))
            .one(&self.database)
            .await?
            .ok_or_else(|| TrackerError::KeyNotFound("profile not exists".to_string()))?;

        let mut active: profiles::ActiveModel = model.into();
        active.picture = ActiveValue::Set(Some(picture));
        active.update(&self.database).await?;
        Ok(())
    }
}
