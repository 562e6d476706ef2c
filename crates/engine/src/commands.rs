//! Command structs for engine operations.
//!
//! These types group parameters for write operations, keeping call sites
//! readable and avoiding long argument lists.

use chrono::{DateTime, Utc};

use crate::TransactionKind;

/// Create a category.
#[derive(Clone, Debug)]
pub struct CreateCategoryCmd {
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub kind: TransactionKind,
}

impl CreateCategoryCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            icon: icon.into(),
            kind,
        }
    }
}

/// Record a single income or expense transaction.
///
/// `category_name` is resolved against the caller's categories at write time;
/// `occurred_at` is expected to already be a UTC calendar day (time-of-day
/// zeroed at the boundary).
#[derive(Clone, Debug)]
pub struct RecordTransactionCmd {
    pub user_id: String,
    pub amount_minor: i64,
    pub description: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub kind: TransactionKind,
    pub category_name: String,
}

impl RecordTransactionCmd {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        kind: TransactionKind,
        amount_minor: i64,
        category_name: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            amount_minor,
            description: None,
            occurred_at,
            kind,
            category_name: category_name.into(),
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
