use sea_orm::{ConnectionTrait, Statement, prelude::*};

use crate::{Currency, EngineError, ResultEngine, UserSettings, user_settings};

use super::Engine;

impl Engine {
    /// The user's settings row, seeded with the default currency on first
    /// access so formatting callers always have something to work with.
    pub async fn user_settings(&self, user_id: &str) -> ResultEngine<UserSettings> {
        if let Some(model) = user_settings::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
        {
            return UserSettings::try_from(model);
        }

        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "INSERT INTO user_settings (user_id, currency) VALUES (?, ?) \
             ON CONFLICT(user_id) DO NOTHING",
            vec![user_id.into(), Currency::default().code().into()],
        );
        self.database.execute(stmt).await?;

        let model = user_settings::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user settings not exists".to_string()))?;
        UserSettings::try_from(model)
    }

    /// Set the user's currency, creating the settings row if needed.
    pub async fn update_user_currency(
        &self,
        user_id: &str,
        currency: Currency,
    ) -> ResultEngine<UserSettings> {
        let backend = self.database.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "INSERT INTO user_settings (user_id, currency) VALUES (?, ?) \
             ON CONFLICT(user_id) DO UPDATE SET currency = excluded.currency",
            vec![user_id.into(), currency.code().into()],
        );
        self.database.execute(stmt).await?;

        Ok(UserSettings {
            user_id: user_id.to_string(),
            currency,
        })
    }
}
