//! Statistics API endpoints

use api_types::stats::{BalanceResponse, CategoryStatView, CategoryStatsResponse, StatsRange};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    ServerError,
    categories::to_api_kind,
    server::{ServerState, utc_day},
    user,
};

/// Total income and expense over an inclusive date range.
pub async fn balance(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(range): Query<StatsRange>,
) -> Result<Json<BalanceResponse>, ServerError> {
    let stats = state
        .engine
        .balance_stats(&user.username, utc_day(range.from), utc_day(range.to))
        .await?;

    Ok(Json(BalanceResponse {
        income_minor: stats.income_minor,
        expense_minor: stats.expense_minor,
    }))
}

/// Per-category totals over an inclusive date range, largest first.
pub async fn categories(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(range): Query<StatsRange>,
) -> Result<Json<CategoryStatsResponse>, ServerError> {
    let stats = state
        .engine
        .category_stats(&user.username, utc_day(range.from), utc_day(range.to))
        .await?
        .into_iter()
        .map(|stat| CategoryStatView {
            kind: to_api_kind(stat.kind),
            category_id: stat.category_id,
            category_name: stat.category_name,
            category_icon: stat.category_icon,
            total_minor: stat.total_minor,
        })
        .collect();

    Ok(Json(CategoryStatsResponse { stats }))
}
