//! Transactions API endpoints

use api_types::transaction::{TransactionCreated, TransactionNew};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    categories::to_engine_kind,
    server::{ServerState, utc_day},
    user,
};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let mut cmd = engine::RecordTransactionCmd::new(
        user.username.clone(),
        to_engine_kind(payload.kind),
        payload.amount_minor,
        payload.category,
        utc_day(payload.occurred_at),
    );
    if let Some(description) = payload.description {
        cmd = cmd.description(description);
    }

    let id = state.engine.record_transaction(cmd).await?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id })))
}
