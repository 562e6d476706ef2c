use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, QueryFilter, Statement, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, TransactionKind, categories};

use super::Engine;

/// Display fallback when a stats row references a category id that no longer
/// resolves. Must not fail the whole report.
const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Totals over a date range, summed directly from the ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceStats {
    pub income_minor: i64,
    pub expense_minor: i64,
}

/// One (kind, category) group with its summed amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub category_name: String,
    pub category_icon: String,
    pub total_minor: i64,
}

impl Engine {
    /// Total income and expense in `[from, to]`, both ends inclusive.
    ///
    /// Sums are taken from the `transactions` table rather than the rollups,
    /// so a reporting bug can never hide behind rollup drift.
    pub async fn balance_stats(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultEngine<BalanceStats> {
        Ok(BalanceStats {
            income_minor: self
                .sum_transactions(user_id, TransactionKind::Income, from, to)
                .await?,
            expense_minor: self
                .sum_transactions(user_id, TransactionKind::Expense, from, to)
                .await?,
        })
    }

    async fn sum_transactions(
        &self,
        user_id: &str,
        kind: TransactionKind,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultEngine<i64> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT COALESCE(SUM(amount_minor), 0) AS sum \
             FROM transactions \
             WHERE user_id = ? AND kind = ? AND occurred_at >= ? AND occurred_at <= ?",
            vec![
                user_id.into(),
                kind.as_str().into(),
                from.into(),
                to.into(),
            ],
        );
        let row = self.database.query_one(stmt).await?;
        Ok(row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0))
    }

    /// Per-category totals in `[from, to]`, ordered by summed amount
    /// descending.
    ///
    /// Grouping uses the ledger rows (each carries its category id); the
    /// current display name and icon are joined afterwards, falling back to
    /// [`UNKNOWN_CATEGORY_NAME`] and an empty icon for dangling references.
    pub async fn category_stats(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ResultEngine<Vec<CategoryStat>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT kind, category_id, COALESCE(SUM(amount_minor), 0) AS total \
             FROM transactions \
             WHERE user_id = ? AND occurred_at >= ? AND occurred_at <= ? \
             GROUP BY kind, category_id \
             ORDER BY total DESC, category_id ASC",
            vec![user_id.into(), from.into(), to.into()],
        );
        let rows = self.database.query_all(stmt).await?;

        let mut grouped = Vec::with_capacity(rows.len());
        for row in &rows {
            let kind: String = row.try_get("", "kind")?;
            let category_id: String = row.try_get("", "category_id")?;
            let total_minor: i64 = row.try_get("", "total")?;
            grouped.push((
                TransactionKind::try_from(kind.as_str())?,
                category_id,
                total_minor,
            ));
        }

        let ids: Vec<String> = grouped.iter().map(|(_, id, _)| id.clone()).collect();
        let models = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::Id.is_in(ids))
            .all(&self.database)
            .await?;
        let by_id: HashMap<&str, &categories::Model> =
            models.iter().map(|m| (m.id.as_str(), m)).collect();

        let mut stats = Vec::with_capacity(grouped.len());
        for (kind, category_id, total_minor) in grouped {
            let (category_name, category_icon) = match by_id.get(category_id.as_str()) {
                Some(model) => (model.name.clone(), model.icon.clone()),
                None => (UNKNOWN_CATEGORY_NAME.to_string(), String::new()),
            };
            stats.push(CategoryStat {
                kind,
                category_id: Uuid::parse_str(&category_id)
                    .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
                category_name,
                category_icon,
                total_minor,
            });
        }
        Ok(stats)
    }
}
