use sea_orm::{
    DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    Category, CreateCategoryCmd, EngineError, ResultEngine, TransactionKind, categories,
    util::{normalize_category_display, normalize_category_key},
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a category owned by the calling user.
    ///
    /// The display name is canonicalized and must be unique per user under
    /// normalization; a duplicate fails with [`EngineError::ExistingKey`].
    pub async fn create_category(&self, cmd: CreateCategoryCmd) -> ResultEngine<Category> {
        let name = normalize_category_display(&cmd.name)?;
        let name_norm = normalize_category_key(&name);
        let icon = cmd.icon.trim().to_string();
        if icon.is_empty() {
            return Err(EngineError::InvalidName(
                "category icon must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            if categories::Entity::find()
                .filter(categories::Column::UserId.eq(cmd.user_id.as_str()))
                .filter(categories::Column::NameNorm.eq(name_norm.as_str()))
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(name));
            }

            let category = Category::new(cmd.user_id, name, icon, cmd.kind);
            categories::ActiveModel::from(&category).insert(&db_tx).await?;
            Ok(category)
        })
    }

    /// List the user's categories, optionally restricted to one kind, ordered
    /// by display name.
    pub async fn list_categories(
        &self,
        user_id: &str,
        kind: Option<TransactionKind>,
    ) -> ResultEngine<Vec<Category>> {
        let mut query = categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .order_by_asc(categories::Column::Name);
        if let Some(kind) = kind {
            query = query.filter(categories::Column::Kind.eq(kind.as_str()));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Category::try_from).collect()
    }

    /// Resolve a category by (normalized) name for the given user.
    pub(super) async fn resolve_category(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        name: &str,
    ) -> ResultEngine<categories::Model> {
        let display = normalize_category_display(name)?;
        let name_norm = normalize_category_key(&display);

        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id))
            .filter(categories::Column::NameNorm.eq(name_norm))
            .one(db_tx)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not found".to_string()))
    }
}
