//! Category registry per user.
//!
//! Lookups go through `name_norm`, the normalized form of the display name;
//! the unique index on `(user_id, name_norm)` makes the name the effective
//! lookup key while the uuid stays the stored foreign key.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, TransactionKind, util::normalize_category_key};

/// A user-defined label for classifying transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub icon: String,
    pub kind: TransactionKind,
}

impl Category {
    pub fn new(user_id: String, name: String, icon: String, kind: TransactionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            icon,
            kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub name_norm: String,
    pub icon: String,
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Category> for ActiveModel {
    fn from(category: &Category) -> Self {
        Self {
            id: ActiveValue::Set(category.id.to_string()),
            user_id: ActiveValue::Set(category.user_id.clone()),
            name: ActiveValue::Set(category.name.clone()),
            name_norm: ActiveValue::Set(normalize_category_key(&category.name)),
            icon: ActiveValue::Set(category.icon.clone()),
            kind: ActiveValue::Set(category.kind.as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Category {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?,
            user_id: model.user_id,
            name: model.name,
            icon: model.icon,
            kind: TransactionKind::try_from(model.kind.as_str())?,
        })
    }
}
