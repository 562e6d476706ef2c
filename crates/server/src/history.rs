//! History API endpoints feeding the dashboard charts.

use api_types::history::{
    HistoryDataQuery, HistoryDataResponse, HistoryPeriodsResponse, HistoryPointView, Timeframe,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState, user};

fn to_engine_timeframe(timeframe: Timeframe) -> engine::Timeframe {
    match timeframe {
        Timeframe::Month => engine::Timeframe::Month,
        Timeframe::Year => engine::Timeframe::Year,
    }
}

/// Complete zero-filled series for the selected period.
pub async fn data(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<HistoryDataQuery>,
) -> Result<Json<HistoryDataResponse>, ServerError> {
    let points = state
        .engine
        .history_data(
            &user.username,
            to_engine_timeframe(query.timeframe),
            engine::Period {
                year: query.year,
                month: query.month,
            },
        )
        .await?
        .into_iter()
        .map(|point| HistoryPointView {
            year: point.year,
            month: point.month,
            day: point.day,
            income_minor: point.income_minor,
            expense_minor: point.expense_minor,
        })
        .collect();

    Ok(Json(HistoryDataResponse { points }))
}

/// Years with any recorded data, ascending; empty for a fresh account.
pub async fn periods(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<HistoryPeriodsResponse>, ServerError> {
    let years = state.engine.history_periods(&user.username).await?;

    Ok(Json(HistoryPeriodsResponse { years }))
}
