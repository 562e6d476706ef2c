pub use categories::Category;
pub use commands::{CreateCategoryCmd, RecordTransactionCmd};
pub use currency::Currency;
pub use error::EngineError;
pub use ops::{BalanceStats, CategoryStat, Engine, EngineBuilder, HistoryPoint, Period, Timeframe};
pub use transactions::{Transaction, TransactionKind};
pub use user_settings::UserSettings;

mod categories;
mod commands;
mod currency;
mod error;
mod month_history;
mod ops;
mod transactions;
mod user_settings;
mod util;
mod year_history;

type ResultEngine<T> = Result<T, EngineError>;
