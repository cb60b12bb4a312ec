use crate::api::ErrorResponse;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use quire::auth::AuthError;
use quire::cart::CartError;
use quire::catalog::CatalogError;
use tracing::error;

/// Error returned by every handler, rendered as `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Insufficient permissions")
    }

    /// Logs the cause and hides it from the client
    pub fn internal(cause: impl std::fmt::Display) -> Self {
        error!(error = %cause, "internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.message));

        if self.status == StatusCode::UNAUTHORIZED {
            return (
                self.status,
                [(header::WWW_AUTHENTICATE, "Bearer realm=\"quire\"")],
                body,
            )
                .into_response();
        }

        (self.status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::PermissionDenied => StatusCode::FORBIDDEN,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
            AuthError::InvalidEmail
            | AuthError::EmptyName
            | AuthError::WeakPassword
            | AuthError::CannotDeleteSelf => StatusCode::BAD_REQUEST,
            AuthError::StorageError(_)
            | AuthError::SerializationError(_)
            | AuthError::PasswordHashError(_) => return ApiError::internal(&err),
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let status = match &err {
            CatalogError::BookNotFound(_) | CatalogError::CategoryNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            CatalogError::CategoryInUse(_) => StatusCode::CONFLICT,
            CatalogError::Validation { .. } => StatusCode::BAD_REQUEST,
            CatalogError::StorageError(_) | CatalogError::SerializationError(_) => {
                return ApiError::internal(&err);
            }
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        let status = match &err {
            CartError::InvalidQuantity(_) | CartError::QuantityTooLarge => {
                StatusCode::BAD_REQUEST
            }
            CartError::BookNotFound(_) | CartError::ItemNotInCart(_) => StatusCode::NOT_FOUND,
            CartError::CartUnavailable(_) | CartError::CatalogUnavailable(_) => {
                error!(error = %err, "cart dependency unavailable");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<shared::Error> for ApiError {
    fn from(err: shared::Error) -> Self {
        match err {
            shared::Error::NotFound => ApiError::new(StatusCode::NOT_FOUND, "Not found"),
            other => ApiError::internal(other),
        }
    }
}
