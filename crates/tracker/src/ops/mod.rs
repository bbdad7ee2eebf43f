use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{ResultTracker, TrackerError};

mod budgets;
mod categories;
mod expenses;
mod incomes;
mod reports;
mod users;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Owner-scoped store operations over the persistent database.
///
/// Every operation takes the owning `username` explicitly and filters at
/// the query boundary; there is no ambient current-user state.
#[derive(Debug)]
pub struct Tracker {
    database: DatabaseConnection,
}

impl Tracker {
    /// Return a builder for `Tracker`. Help to build the struct.
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultTracker<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::InvalidName(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Returns the first day of `(year, month)` and the first day of the next
/// month, validating the inputs.
fn month_bounds(year: i32, month: u32) -> ResultTracker<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| TrackerError::InvalidDate(format!("invalid period {year}-{month}")))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| TrackerError::InvalidDate(format!("invalid period {year}-{month}")))?;
    Ok((start, end))
}

/// The builder for `Tracker`
#[derive(Default)]
pub struct TrackerBuilder {
    database: DatabaseConnection,
}

impl TrackerBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> TrackerBuilder {
        self.database = db;
        self
    }

    /// Construct `Tracker`
    pub fn build(self) -> Tracker {
        Tracker {
            database: self.database,
        }
    }
}
