use crate::api::CategoryRequest;
use crate::error::ApiError;
use crate::middleware::{check_permission, CurrentUser};
use crate::state::AppState;
use crate::validation::ValidJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quire::auth::Permission;
use quire::catalog::{Category, CategoryDetails, CategoryId};
use tracing::info;

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::BrowseCatalog)?;

    Ok(Json(state.category_service.list().await?))
}

/// GET /api/v1/categories/{id} - the category with its books
pub async fn get_category(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<CategoryId>,
) -> Result<Json<CategoryDetails>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::BrowseCatalog)?;

    Ok(Json(state.category_service.get(id).await?))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidJson(req): ValidJson<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCatalog)?;

    let category = state.category_service.create(&req.name).await?;
    info!(category_id = category.id, requested_by = current.user.id, "CREATE_CATEGORY");
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<CategoryId>,
    ValidJson(req): ValidJson<CategoryRequest>,
) -> Result<Json<Category>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCatalog)?;

    Ok(Json(state.category_service.rename(id, &req.name).await?))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCatalog)?;

    info!(category_id = id, requested_by = current.user.id, "DELETE_CATEGORY");
    state.category_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
