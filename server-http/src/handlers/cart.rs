use crate::api::{
    AddItemRequest, AdjustQuantityRequest, CartResponse, QuantityRequest, ReplaceCartRequest,
};
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
use shared::BookId;
use tracing::info;

/// Every cart route acts on the caller's own cart
fn cart_owner(state: &AppState, current: &CurrentUser) -> Result<u64, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCart)?;
    Ok(current.user.id)
}

/// GET /api/v1/cart
pub async fn get_cart(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    Ok(Json(state.cart.get_cart(user_id).await?.into()))
}

/// DELETE /api/v1/cart
pub async fn clear_cart(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    state.cart.clear_cart(user_id).await?;
    info!(user_id, "CLEAR_CART");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/cart/items
pub async fn add_item(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidJson(req): ValidJson<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    info!(user_id, book_id = req.book_id, qty = req.qty, "ADD_TO_CART");
    Ok(Json(state.cart.add_to_cart(user_id, req.into()).await?.into()))
}

/// PUT /api/v1/cart/items
pub async fn replace_items(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidJson(req): ValidJson<ReplaceCartRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;
    let items = req.items.into_iter().map(Into::into).collect();

    Ok(Json(state.cart.replace_all(user_id, items).await?.into()))
}

/// PATCH /api/v1/cart/items/{book_id}
pub async fn update_quantity(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(book_id): Path<BookId>,
    ValidJson(req): ValidJson<QuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    Ok(Json(
        state
            .cart
            .update_quantity(user_id, book_id, req.qty)
            .await?
            .into(),
    ))
}

/// PUT /api/v1/cart/items/{book_id}
pub async fn replace_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(book_id): Path<BookId>,
    ValidJson(req): ValidJson<QuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    Ok(Json(
        state
            .cart
            .replace_item(user_id, book_id, req.qty)
            .await?
            .into(),
    ))
}

/// POST /api/v1/cart/items/{book_id}/adjust
pub async fn adjust_quantity(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(book_id): Path<BookId>,
    ValidJson(req): ValidJson<AdjustQuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    Ok(Json(
        state
            .cart
            .adjust_quantity(user_id, book_id, req.mode, req.qty)
            .await?
            .into(),
    ))
}

/// DELETE /api/v1/cart/items/{book_id}
pub async fn remove_item(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(book_id): Path<BookId>,
) -> Result<Json<CartResponse>, ApiError> {
    let user_id = cart_owner(&state, &current)?;

    info!(user_id, book_id, "REMOVE_FROM_CART");
    Ok(Json(state.cart.remove_item(user_id, book_id).await?.into()))
}
