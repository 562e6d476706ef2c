//! Categories API endpoints.

use api_types::category::{CategoryCreate, CategoryListQuery, CategoryListResponse, CategoryView};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, user};

pub(crate) fn to_engine_kind(kind: api_types::TransactionKind) -> engine::TransactionKind {
    match kind {
        api_types::TransactionKind::Income => engine::TransactionKind::Income,
        api_types::TransactionKind::Expense => engine::TransactionKind::Expense,
    }
}

pub(crate) fn to_api_kind(kind: engine::TransactionKind) -> api_types::TransactionKind {
    match kind {
        engine::TransactionKind::Income => api_types::TransactionKind::Income,
        engine::TransactionKind::Expense => api_types::TransactionKind::Expense,
    }
}

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        icon: category.icon,
        kind: to_api_kind(category.kind),
    }
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Query(query): Query<CategoryListQuery>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .list_categories(&user.username, query.kind.map(to_engine_kind))
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(engine::CreateCategoryCmd::new(
            user.username.clone(),
            payload.name,
            payload.icon,
            to_engine_kind(payload.kind),
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(map_category(category))))
}
