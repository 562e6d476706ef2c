//! Transaction primitives.
//!
//! A `Transaction` is a single immutable income or expense event. Besides the
//! category reference it carries a snapshot of the category icon taken at
//! write time, so a ledger entry keeps rendering the way it looked when it was
//! recorded.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidName(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: String,
    pub kind: TransactionKind,
    pub occurred_at: DateTime<Utc>,
    pub amount_minor: i64,
    pub description: String,
    pub category_id: Uuid,
    pub category_icon: String,
}

impl Transaction {
    pub fn new(
        user_id: String,
        kind: TransactionKind,
        occurred_at: DateTime<Utc>,
        amount_minor: i64,
        description: String,
        category_id: Uuid,
        category_icon: String,
    ) -> ResultEngine<Self> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            occurred_at,
            amount_minor,
            description,
            category_id,
            category_icon,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub occurred_at: DateTimeUtc,
    pub amount_minor: i64,
    pub description: String,
    pub category_id: String,
    pub category_icon: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            user_id: ActiveValue::Set(tx.user_id.clone()),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            occurred_at: ActiveValue::Set(tx.occurred_at),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            description: ActiveValue::Set(tx.description.clone()),
            category_id: ActiveValue::Set(tx.category_id.to_string()),
            category_icon: ActiveValue::Set(tx.category_icon.clone()),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("transaction not exists".to_string()))?,
            user_id: model.user_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            occurred_at: model.occurred_at,
            amount_minor: model.amount_minor,
            description: model.description,
            category_id: Uuid::parse_str(&model.category_id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            category_icon: model.category_icon,
        })
    }
}
