use std::collections::HashMap;

use sea_orm::{ConnectionTrait, QueryFilter, Statement, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine, month_history, util::days_in_month, year_history,
};

use super::Engine;

/// Granularity of a history series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Month,
    Year,
}

impl Timeframe {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl TryFrom<&str> for Timeframe {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(EngineError::InvalidName(format!(
                "invalid timeframe: {other}"
            ))),
        }
    }
}

/// The period a history series covers. `month` (1-12) is required for the
/// month timeframe and ignored for the year timeframe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: Option<u32>,
}

/// One bucket of a history series: a day of a month, or a month of a year
/// (`day` is `None`). Buckets with no recorded transactions carry zeros.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub year: i32,
    pub month: u32,
    pub day: Option<u32>,
    pub income_minor: i64,
    pub expense_minor: i64,
}

impl Engine {
    /// Complete, zero-filled history series for a chart.
    ///
    /// Month timeframe: one point per day of `(period.year, period.month)`.
    /// Year timeframe: one point per month of `period.year`.
    pub async fn history_data(
        &self,
        user_id: &str,
        timeframe: Timeframe,
        period: Period,
    ) -> ResultEngine<Vec<HistoryPoint>> {
        match timeframe {
            Timeframe::Month => {
                let month = period.month.ok_or_else(|| {
                    EngineError::InvalidDate(
                        "month is required for the month timeframe".to_string(),
                    )
                })?;
                self.month_points(user_id, period.year, month).await
            }
            Timeframe::Year => self.year_points(user_id, period.year).await,
        }
    }

    async fn month_points(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
    ) -> ResultEngine<Vec<HistoryPoint>> {
        let days = days_in_month(year, month)?;

        let models = month_history::Entity::find()
            .filter(month_history::Column::UserId.eq(user_id))
            .filter(month_history::Column::Month.eq(month as i32))
            .filter(month_history::Column::Year.eq(year))
            .all(&self.database)
            .await?;
        let by_day: HashMap<u32, (i64, i64)> = models
            .into_iter()
            .map(|m| (m.day as u32, (m.income_minor, m.expense_minor)))
            .collect();

        Ok((1..=days)
            .map(|day| {
                let (income_minor, expense_minor) = by_day.get(&day).copied().unwrap_or((0, 0));
                HistoryPoint {
                    year,
                    month,
                    day: Some(day),
                    income_minor,
                    expense_minor,
                }
            })
            .collect())
    }

    async fn year_points(&self, user_id: &str, year: i32) -> ResultEngine<Vec<HistoryPoint>> {
        let models = year_history::Entity::find()
            .filter(year_history::Column::UserId.eq(user_id))
            .filter(year_history::Column::Year.eq(year))
            .all(&self.database)
            .await?;
        let by_month: HashMap<u32, (i64, i64)> = models
            .into_iter()
            .map(|m| (m.month as u32, (m.income_minor, m.expense_minor)))
            .collect();

        Ok((1..=12)
            .map(|month| {
                let (income_minor, expense_minor) =
                    by_month.get(&month).copied().unwrap_or((0, 0));
                HistoryPoint {
                    year,
                    month,
                    day: None,
                    income_minor,
                    expense_minor,
                }
            })
            .collect())
    }

    /// Distinct years with any recorded data, ascending. An empty result is
    /// valid (a fresh account); the caller decides the default period.
    pub async fn history_periods(&self, user_id: &str) -> ResultEngine<Vec<i32>> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "SELECT DISTINCT year FROM year_history WHERE user_id = ? ORDER BY year ASC",
            vec![user_id.into()],
        );
        let rows = self.database.query_all(stmt).await?;
        rows.iter()
            .map(|row| row.try_get("", "year").map_err(Into::into))
            .collect()
    }
}
