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
use quire::catalog::{BookDetails, BookUpdate, NewBook};
use shared::BookId;
use tracing::info;

/// GET /api/v1/books
pub async fn list_books(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<BookDetails>>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::BrowseCatalog)?;

    Ok(Json(state.book_service.list().await?))
}

/// GET /api/v1/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<BookId>,
) -> Result<Json<BookDetails>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::BrowseCatalog)?;

    Ok(Json(state.book_service.get(id).await?))
}

/// POST /api/v1/books
pub async fn create_book(
    State(state): State<AppState>,
    current: CurrentUser,
    ValidJson(req): ValidJson<NewBook>,
) -> Result<(StatusCode, Json<BookDetails>), ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCatalog)?;

    let book = state.book_service.create(req).await?;
    info!(book_id = book.book.id, requested_by = current.user.id, "CREATE_BOOK");
    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/v1/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<BookId>,
    ValidJson(req): ValidJson<BookUpdate>,
) -> Result<Json<BookDetails>, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCatalog)?;

    info!(book_id = id, requested_by = current.user.id, "UPDATE_BOOK");
    Ok(Json(state.book_service.update(id, req).await?))
}

/// DELETE /api/v1/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<BookId>,
) -> Result<StatusCode, ApiError> {
    check_permission(&state.auth_service, &current.user, Permission::ManageCatalog)?;

    info!(book_id = id, requested_by = current.user.id, "DELETE_BOOK");
    state.book_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
