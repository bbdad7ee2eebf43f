use sea_orm::{ConnectionTrait, Statement};

use crate::{MoneyCents, ResultTracker};

use super::{Tracker, month_bounds};

impl Tracker {
    /// Sum of expense amounts per category for `(year, month)`, restricted
    /// to `owner`.
    ///
    /// Ordered by total descending; ties are broken by category name
    /// ascending so the result is deterministic. An empty period yields an
    /// empty vector.
    pub async fn category_totals(
        &self,
        owner: &str,
        year: i32,
        month: u32,
    ) -> ResultTracker<Vec<(String, MoneyCents)>> {
        let (start, end) = month_bounds(year, month)?;

        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT c.name AS name, SUM(e.amount_cents) AS total \
             FROM expenses AS e \
             INNER JOIN categories AS c ON c.id = e.category_id \
             WHERE e.username = ? AND e.date >= ? AND e.date < ? \
             GROUP BY c.id, c.name \
             ORDER BY total DESC, c.name ASC",
            vec![owner.into(), start.into(), end.into()],
        );

        let rows = self.database.query_all(stmt).await?;
        let mut totals = Vec::with_capacity(rows.len());
        for row in rows {
            let name: String = row.try_get("", "name")?;
            let total: i64 = row.try_get("", "total")?;
            totals.push((name, MoneyCents::new(total)));
        }
        Ok(totals)
    }
}
