//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Gruzzolo:
//!
//! - `users`: authentication
//! - `categories`: per-user transaction labels
//! - `transactions`: the ledger itself
//! - `month_history`: daily income/expense rollups
//! - `year_history`: monthly income/expense rollups
//! - `user_settings`: per-user currency preference

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
    UserId,
    Name,
    NameNorm,
    Icon,
    Kind,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    UserId,
    Kind,
    OccurredAt,
    AmountMinor,
    Description,
    CategoryId,
    CategoryIcon,
}

#[derive(Iden)]
enum MonthHistory {
    Table,
    UserId,
    Day,
    Month,
    Year,
    IncomeMinor,
    ExpenseMinor,
}

#[derive(Iden)]
enum YearHistory {
    Table,
    UserId,
    Month,
    Year,
    IncomeMinor,
    ExpenseMinor,
}

#[derive(Iden)]
enum UserSettings {
    Table,
    UserId,
    Currency,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::UserId).string().not_null())
                    .col(ColumnDef::new(Categories::Name).string().not_null())
                    .col(ColumnDef::new(Categories::NameNorm).string().not_null())
                    .col(ColumnDef::new(Categories::Icon).string().not_null())
                    .col(ColumnDef::new(Categories::Kind).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-categories-user_id")
                            .from(Categories::Table, Categories::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-categories-user_id-name_norm-unique")
                    .table(Categories::Table)
                    .col(Categories::UserId)
                    .col(Categories::NameNorm)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(ColumnDef::new(Transactions::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::OccurredAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Description)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Transactions::CategoryId).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::CategoryIcon)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    // No FK on category_id: stats must tolerate dangling
                    // category references ("Unknown" fallback).
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-occurred_at")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-category_id")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Month history (daily rollups)
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(MonthHistory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(MonthHistory::UserId).string().not_null())
                    .col(ColumnDef::new(MonthHistory::Day).integer().not_null())
                    .col(ColumnDef::new(MonthHistory::Month).integer().not_null())
                    .col(ColumnDef::new(MonthHistory::Year).integer().not_null())
                    .col(
                        ColumnDef::new(MonthHistory::IncomeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthHistory::ExpenseMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(MonthHistory::UserId)
                            .col(MonthHistory::Day)
                            .col(MonthHistory::Month)
                            .col(MonthHistory::Year),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-month_history-user_id")
                            .from(MonthHistory::Table, MonthHistory::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-month_history-user_id-year-month")
                    .table(MonthHistory::Table)
                    .col(MonthHistory::UserId)
                    .col(MonthHistory::Year)
                    .col(MonthHistory::Month)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Year history (monthly rollups)
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(YearHistory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(YearHistory::UserId).string().not_null())
                    .col(ColumnDef::new(YearHistory::Month).integer().not_null())
                    .col(ColumnDef::new(YearHistory::Year).integer().not_null())
                    .col(
                        ColumnDef::new(YearHistory::IncomeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(YearHistory::ExpenseMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(YearHistory::UserId)
                            .col(YearHistory::Month)
                            .col(YearHistory::Year),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-year_history-user_id")
                            .from(YearHistory::Table, YearHistory::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-year_history-user_id-year")
                    .table(YearHistory::Table)
                    .col(YearHistory::UserId)
                    .col(YearHistory::Year)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. User settings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(UserSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserSettings::UserId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserSettings::Currency).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_settings-user_id")
                            .from(UserSettings::Table, UserSettings::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(UserSettings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(YearHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
