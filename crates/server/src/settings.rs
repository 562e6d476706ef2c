//! User settings API endpoints.

use api_types::settings::{CurrencyUpdate, UserSettingsView};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, user};

fn to_api_currency(currency: engine::Currency) -> api_types::Currency {
    match currency {
        engine::Currency::Usd => api_types::Currency::Usd,
        engine::Currency::Inr => api_types::Currency::Inr,
        engine::Currency::Eur => api_types::Currency::Eur,
        engine::Currency::Gbp => api_types::Currency::Gbp,
        engine::Currency::Jpy => api_types::Currency::Jpy,
    }
}

fn to_engine_currency(currency: api_types::Currency) -> engine::Currency {
    match currency {
        api_types::Currency::Usd => engine::Currency::Usd,
        api_types::Currency::Inr => engine::Currency::Inr,
        api_types::Currency::Eur => engine::Currency::Eur,
        api_types::Currency::Gbp => engine::Currency::Gbp,
        api_types::Currency::Jpy => engine::Currency::Jpy,
    }
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<UserSettingsView>, ServerError> {
    let settings = state.engine.user_settings(&user.username).await?;

    Ok(Json(UserSettingsView {
        currency: to_api_currency(settings.currency),
    }))
}

pub async fn update_currency(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CurrencyUpdate>,
) -> Result<Json<UserSettingsView>, ServerError> {
    let settings = state
        .engine
        .update_user_currency(&user.username, to_engine_currency(payload.currency))
        .await?;

    Ok(Json(UserSettingsView {
        currency: to_api_currency(settings.currency),
    }))
}
