use crate::api::{LoginRequest, LoginResponse, LogoutResponse};
use crate::error::ApiError;
use crate::middleware::authentication::{client_ip, extract_basic_auth, CurrentUser};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    Json,
};
use tracing::info;

/// POST /api/auth/login
///
/// Accepts either a JSON body `{"email": ..., "password": ...}` or a Basic
/// Auth header, and returns a bearer token for subsequent requests.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let (email, password) = match body {
        Ok(Json(req)) => (req.email, req.password),
        Err(_) => {
            let auth_header = headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| {
                    ApiError::bad_request(
                        "Missing credentials. Provide either JSON body or Basic Auth header",
                    )
                })?;
            extract_basic_auth(auth_header)
                .ok_or_else(|| ApiError::bad_request("Invalid Authorization header format"))?
        }
    };

    let session = state
        .auth_service
        .login(&email, &password, client_ip(&headers))
        .await?;

    info!(user_id = session.user.id, "LOGIN");

    Ok(Json(LoginResponse {
        token: session.token.clone(),
        expires_in: state.session_ttl_secs,
        expires_at: session.expires_at_utc(),
        user: session.user.into(),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<LogoutResponse>, ApiError> {
    state.auth_service.logout(&current.token).await?;
    info!(user_id = current.user.id, "LOGOUT");

    Ok(Json(LogoutResponse {
        message: "Session logged out successfully".to_string(),
    }))
}
