use crate::api::{RegisterRequest, UpdateUserRequest, UserResponse};
use crate::error::ApiError;
use crate::middleware::{check_permission, check_self_or_permission, CurrentUser};
use crate::state::AppState;
use crate::validation::ValidJson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use quire::auth::{Permission, Role};
use shared::UserId;
use tracing::info;

/// POST /api/v1/users - Register an account
///
/// Anonymous callers always get a customer account; an admin may pick the role.
pub async fn register(
    State(state): State<AppState>,
    current: Option<CurrentUser>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let role = match (req.role, &current) {
        (Some(role), Some(current)) if role != Role::Customer => {
            check_permission(&state.auth_service, &current.user, Permission::ManageUsers)?;
            role
        }
        (Some(Role::Admin), None) => return Err(ApiError::forbidden()),
        _ => Role::Customer,
    };

    let user = state
        .user_service
        .register(&req.name, &req.email, &req.password, role)
        .await?;

    info!(
        user_id = user.id,
        requested_by = current.as_ref().map(|c| c.user.id),
        "CREATE_USER"
    );
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageUsers)?;

    let users = state.user_service.list_users().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<Json<UserResponse>, ApiError> {
    check_self_or_permission(&state.auth_service, &current.user, id)?;

    Ok(Json(state.user_service.get_user(id).await?.into()))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<UserId>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    check_self_or_permission(&state.auth_service, &current.user, id)?;

    // Role changes are an admin concern even on one's own account
    if req.role.is_some() {
        check_permission(&state.auth_service, &current.user, Permission::ManageUsers)?;
    }

    info!(user_id = id, requested_by = current.user.id, "UPDATE_USER");
    let user = state.user_service.update_user(id, req.into()).await?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    check_self_or_permission(&state.auth_service, &current.user, id)?;

    info!(user_id = id, requested_by = current.user.id, "DELETE_USER");
    state.user_service.delete_user(id, current.user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
