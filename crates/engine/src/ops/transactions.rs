use chrono::Datelike;
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, Statement, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, RecordTransactionCmd, ResultEngine, Transaction, TransactionKind, transactions,
};

use super::{Engine, with_tx};

impl Engine {
    /// Record a transaction and fold it into both rollup tables.
    ///
    /// The three writes happen in one DB transaction: the ledger row insert
    /// and the two rollup upserts commit together or not at all. The rollup
    /// increments run as `ON CONFLICT .. DO UPDATE SET x = x + excluded.x`,
    /// so concurrent writers on the same bucket serialize in the storage
    /// layer instead of racing a read-modify-write here.
    ///
    /// There is no idempotency key: resubmitting the same call records a
    /// second transaction and counts twice.
    pub async fn record_transaction(&self, cmd: RecordTransactionCmd) -> ResultEngine<Uuid> {
        with_tx!(self, |db_tx| {
            let category = self
                .resolve_category(&db_tx, &cmd.user_id, &cmd.category_name)
                .await?;
            let category_id = Uuid::parse_str(&category.id)
                .map_err(|_| EngineError::KeyNotFound("category not exists".to_string()))?;

            let description = cmd
                .description
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string();

            let tx = Transaction::new(
                cmd.user_id.clone(),
                cmd.kind,
                cmd.occurred_at,
                cmd.amount_minor,
                description,
                category_id,
                category.icon.clone(),
            )?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;

            // Route the amount to the matching rollup column; the other
            // column still takes part in the upsert with a zero delta.
            let (income_minor, expense_minor) = match cmd.kind {
                TransactionKind::Income => (cmd.amount_minor, 0),
                TransactionKind::Expense => (0, cmd.amount_minor),
            };
            let day = cmd.occurred_at.day() as i32;
            let month = cmd.occurred_at.month() as i32;
            let year = cmd.occurred_at.year();

            self.bump_month_history(&db_tx, &cmd.user_id, day, month, year, income_minor, expense_minor)
                .await?;
            self.bump_year_history(&db_tx, &cmd.user_id, month, year, income_minor, expense_minor)
                .await?;

            Ok(tx.id)
        })
    }

    async fn bump_month_history(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        day: i32,
        month: i32,
        year: i32,
        income_minor: i64,
        expense_minor: i64,
    ) -> ResultEngine<()> {
        let backend = db_tx.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "INSERT INTO month_history (user_id, day, month, year, income_minor, expense_minor) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT(user_id, day, month, year) DO UPDATE SET \
             income_minor = income_minor + excluded.income_minor, \
             expense_minor = expense_minor + excluded.expense_minor",
            vec![
                user_id.into(),
                day.into(),
                month.into(),
                year.into(),
                income_minor.into(),
                expense_minor.into(),
            ],
        );
        db_tx.execute(stmt).await?;
        Ok(())
    }

    async fn bump_year_history(
        &self,
        db_tx: &DatabaseTransaction,
        user_id: &str,
        month: i32,
        year: i32,
        income_minor: i64,
        expense_minor: i64,
    ) -> ResultEngine<()> {
        let backend = db_tx.get_database_backend();
        let stmt = Statement::from_sql_and_values(
            backend,
            "INSERT INTO year_history (user_id, month, year, income_minor, expense_minor) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(user_id, month, year) DO UPDATE SET \
             income_minor = income_minor + excluded.income_minor, \
             expense_minor = expense_minor + excluded.expense_minor",
            vec![
                user_id.into(),
                month.into(),
                year.into(),
                income_minor.into(),
                expense_minor.into(),
            ],
        );
        db_tx.execute(stmt).await?;
        Ok(())
    }
}
