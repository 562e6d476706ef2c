use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};

use engine::{
    CreateCategoryCmd, Engine, EngineError, Period, RecordTransactionCmd, Timeframe,
    TransactionKind,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    for username in ["alice", "bob"] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (username, password) VALUES (?, ?)",
            vec![username.into(), "password".into()],
        ))
        .await
        .unwrap();
    }
    let engine = Engine::builder().database(db.clone()).build();
    (engine, db)
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

async fn new_category(engine: &Engine, user: &str, name: &str, icon: &str, kind: TransactionKind) {
    engine
        .create_category(CreateCategoryCmd::new(user, name, icon, kind))
        .await
        .unwrap();
}

async fn count_transactions(db: &DatabaseConnection, user: &str) -> i64 {
    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT COUNT(*) AS count FROM transactions WHERE user_id = ?",
            vec![user.into()],
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get("", "count").unwrap()
}

async fn month_point(
    engine: &Engine,
    user: &str,
    year: i32,
    month: u32,
    day_of_month: u32,
) -> (i64, i64) {
    let points = engine
        .history_data(
            user,
            Timeframe::Month,
            Period {
                year,
                month: Some(month),
            },
        )
        .await
        .unwrap();
    let point = points
        .iter()
        .find(|p| p.day == Some(day_of_month))
        .expect("day missing from series");
    (point.income_minor, point.expense_minor)
}

async fn year_point(engine: &Engine, user: &str, year: i32, month: u32) -> (i64, i64) {
    let points = engine
        .history_data(user, Timeframe::Year, Period { year, month: None })
        .await
        .unwrap();
    let point = points
        .iter()
        .find(|p| p.month == month)
        .expect("month missing from series");
    (point.income_minor, point.expense_minor)
}

#[tokio::test]
async fn record_transaction_persists_row_with_icon_snapshot() {
    let (engine, db) = engine_with_db().await;
    new_category(&engine, "alice", "Groceries", "🛒", TransactionKind::Expense).await;

    let id = engine
        .record_transaction(
            RecordTransactionCmd::new(
                "alice",
                TransactionKind::Expense,
                1250,
                "Groceries",
                day(2024, 3, 15),
            )
            .description("weekly shop"),
        )
        .await
        .unwrap();

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT kind, amount_minor, description, category_icon FROM transactions WHERE id = ?",
            vec![id.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.try_get::<String>("", "kind").unwrap(), "expense");
    assert_eq!(row.try_get::<i64>("", "amount_minor").unwrap(), 1250);
    assert_eq!(
        row.try_get::<String>("", "description").unwrap(),
        "weekly shop"
    );
    assert_eq!(row.try_get::<String>("", "category_icon").unwrap(), "🛒");
}

#[tokio::test]
async fn description_defaults_to_empty() {
    let (engine, db) = engine_with_db().await;
    new_category(&engine, "alice", "Salary", "💰", TransactionKind::Income).await;

    let id = engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Income,
            5000,
            "Salary",
            day(2024, 3, 1),
        ))
        .await
        .unwrap();

    let backend = db.get_database_backend();
    let row = db
        .query_one(Statement::from_sql_and_values(
            backend,
            "SELECT description FROM transactions WHERE id = ?",
            vec![id.to_string().into()],
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.try_get::<String>("", "description").unwrap(), "");
}

#[tokio::test]
async fn rollups_track_every_single_insert() {
    let (engine, _db) = engine_with_db().await;
    new_category(&engine, "alice", "Salary", "💰", TransactionKind::Income).await;
    new_category(&engine, "alice", "Food", "🍔", TransactionKind::Expense).await;

    let at = day(2024, 3, 15);

    engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Income,
            100,
            "Salary",
            at,
        ))
        .await
        .unwrap();
    assert_eq!(month_point(&engine, "alice", 2024, 3, 15).await, (100, 0));
    assert_eq!(year_point(&engine, "alice", 2024, 3).await, (100, 0));

    engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Expense,
            40,
            "Food",
            at,
        ))
        .await
        .unwrap();
    assert_eq!(month_point(&engine, "alice", 2024, 3, 15).await, (100, 40));
    assert_eq!(year_point(&engine, "alice", 2024, 3).await, (100, 40));

    engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Income,
            60,
            "Salary",
            at,
        ))
        .await
        .unwrap();
    assert_eq!(month_point(&engine, "alice", 2024, 3, 15).await, (160, 40));
    assert_eq!(year_point(&engine, "alice", 2024, 3).await, (160, 40));
}

#[tokio::test]
async fn year_rollup_equals_sum_of_daily_rollups() {
    let (engine, _db) = engine_with_db().await;
    new_category(&engine, "alice", "Salary", "💰", TransactionKind::Income).await;

    for (d, amount) in [(1, 1000), (10, 250), (10, 750), (28, 500)] {
        engine
            .record_transaction(RecordTransactionCmd::new(
                "alice",
                TransactionKind::Income,
                amount,
                "Salary",
                day(2024, 3, d),
            ))
            .await
            .unwrap();
    }

    let points = engine
        .history_data(
            "alice",
            Timeframe::Month,
            Period {
                year: 2024,
                month: Some(3),
            },
        )
        .await
        .unwrap();
    let daily_income: i64 = points.iter().map(|p| p.income_minor).sum();

    assert_eq!(daily_income, 2500);
    assert_eq!(year_point(&engine, "alice", 2024, 3).await, (2500, 0));
}

#[tokio::test]
async fn resubmitting_the_same_call_double_counts() {
    let (engine, db) = engine_with_db().await;
    new_category(&engine, "alice", "Salary", "💰", TransactionKind::Income).await;

    let cmd = RecordTransactionCmd::new(
        "alice",
        TransactionKind::Income,
        5000,
        "Salary",
        day(2024, 3, 15),
    );
    engine.record_transaction(cmd.clone()).await.unwrap();
    engine.record_transaction(cmd).await.unwrap();

    assert_eq!(count_transactions(&db, "alice").await, 2);
    assert_eq!(month_point(&engine, "alice", 2024, 3, 15).await, (10000, 0));
    assert_eq!(year_point(&engine, "alice", 2024, 3).await, (10000, 0));
}

#[tokio::test]
async fn missing_category_fails_and_writes_nothing() {
    let (engine, db) = engine_with_db().await;

    let err = engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Expense,
            100,
            "Nope",
            day(2024, 3, 15),
        ))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("category not found".to_string()));

    assert_eq!(count_transactions(&db, "alice").await, 0);
    assert_eq!(month_point(&engine, "alice", 2024, 3, 15).await, (0, 0));
}

#[tokio::test]
async fn another_users_category_is_not_visible() {
    let (engine, db) = engine_with_db().await;
    new_category(&engine, "bob", "Salary", "💰", TransactionKind::Income).await;

    let err = engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Income,
            5000,
            "Salary",
            day(2024, 3, 15),
        ))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("category not found".to_string()));

    assert_eq!(count_transactions(&db, "alice").await, 0);
    assert_eq!(month_point(&engine, "bob", 2024, 3, 15).await, (0, 0));
}

#[tokio::test]
async fn non_positive_amounts_are_rejected() {
    let (engine, db) = engine_with_db().await;
    new_category(&engine, "alice", "Food", "🍔", TransactionKind::Expense).await;

    for amount in [0, -500] {
        let err = engine
            .record_transaction(RecordTransactionCmd::new(
                "alice",
                TransactionKind::Expense,
                amount,
                "Food",
                day(2024, 3, 15),
            ))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidAmount("amount_minor must be > 0".to_string())
        );
    }

    assert_eq!(count_transactions(&db, "alice").await, 0);
}

#[tokio::test]
async fn category_names_are_unique_per_user_under_normalization() {
    let (engine, _db) = engine_with_db().await;
    new_category(&engine, "alice", "Groceries", "🛒", TransactionKind::Expense).await;

    let err = engine
        .create_category(CreateCategoryCmd::new(
            "alice",
            "GROCERIES",
            "🧺",
            TransactionKind::Expense,
        ))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("GROCERIES".to_string()));

    // Same name is fine for a different user.
    engine
        .create_category(CreateCategoryCmd::new(
            "bob",
            "Groceries",
            "🛒",
            TransactionKind::Expense,
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn category_lookup_ignores_case_and_spacing() {
    let (engine, _db) = engine_with_db().await;
    new_category(&engine, "alice", "Eating out", "🍽", TransactionKind::Expense).await;

    engine
        .record_transaction(RecordTransactionCmd::new(
            "alice",
            TransactionKind::Expense,
            300,
            "  eating   OUT ",
            day(2024, 3, 15),
        ))
        .await
        .unwrap();

    assert_eq!(month_point(&engine, "alice", 2024, 3, 15).await, (0, 300));
}

#[tokio::test]
async fn list_categories_sorted_by_name_with_kind_filter() {
    let (engine, _db) = engine_with_db().await;
    new_category(&engine, "alice", "Rent", "🏠", TransactionKind::Expense).await;
    new_category(&engine, "alice", "Food", "🍔", TransactionKind::Expense).await;
    new_category(&engine, "alice", "Salary", "💰", TransactionKind::Income).await;

    let all = engine.list_categories("alice", None).await.unwrap();
    let names: Vec<&str> = all.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Food", "Rent", "Salary"]);

    let expenses = engine
        .list_categories("alice", Some(TransactionKind::Expense))
        .await
        .unwrap();
    assert!(expenses.iter().all(|c| c.kind == TransactionKind::Expense));
    assert_eq!(expenses.len(), 2);

    // Other users' categories never show up.
    assert!(engine.list_categories("bob", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_category_name_or_icon_is_invalid() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_category(CreateCategoryCmd::new(
            "alice",
            "   ",
            "🍔",
            TransactionKind::Expense,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));

    let err = engine
        .create_category(CreateCategoryCmd::new(
            "alice",
            "Food",
            "  ",
            TransactionKind::Expense,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidName(_)));
}
