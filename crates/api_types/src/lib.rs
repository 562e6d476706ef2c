use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display currency a user can pick. Codes only; no conversion semantics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Inr,
    Eur,
    Gbp,
    Jpy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

pub mod category {
    use super::*;

    /// Request body for creating a category.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        pub icon: String,
        pub kind: TransactionKind,
    }

    /// Query string for listing categories.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListQuery {
        pub kind: Option<TransactionKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub icon: String,
        pub kind: TransactionKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<CategoryView>,
    }
}

pub mod transaction {
    use super::*;

    /// Request body for recording a transaction.
    ///
    /// `occurred_at` is an RFC3339 timestamp with offset; the server truncates
    /// it to the UTC calendar day before it reaches the ledger.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount_minor: i64,
        pub description: Option<String>,
        pub occurred_at: DateTime<FixedOffset>,
        pub kind: TransactionKind,
        /// Category display name; resolved server-side per user.
        pub category: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreated {
        pub id: Uuid,
    }
}

pub mod stats {
    use super::*;

    /// Query string for the stats endpoints; both ends inclusive.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatsRange {
        pub from: DateTime<FixedOffset>,
        pub to: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceResponse {
        pub income_minor: i64,
        pub expense_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryStatView {
        pub kind: TransactionKind,
        pub category_id: Uuid,
        pub category_name: String,
        pub category_icon: String,
        pub total_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryStatsResponse {
        pub stats: Vec<CategoryStatView>,
    }
}

pub mod history {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Timeframe {
        Month,
        Year,
    }

    /// Query string for the history series endpoint. `month` (1-12) is
    /// required when `timeframe` is `month`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryDataQuery {
        pub timeframe: Timeframe,
        pub year: i32,
        pub month: Option<u32>,
    }

    /// One chart bucket; `day` is absent for the year timeframe.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryPointView {
        pub year: i32,
        pub month: u32,
        pub day: Option<u32>,
        pub income_minor: i64,
        pub expense_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryDataResponse {
        pub points: Vec<HistoryPointView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HistoryPeriodsResponse {
        pub years: Vec<i32>,
    }
}

pub mod settings {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserSettingsView {
        pub currency: Currency,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyUpdate {
        pub currency: Currency,
    }
}
