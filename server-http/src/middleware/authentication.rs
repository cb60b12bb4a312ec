use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use quire::auth::{SessionToken, User};

/// The caller behind a valid `Authorization: Bearer <token>` header
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: SessionToken,
}

/// Extract Basic Auth credentials from Authorization header
pub fn extract_basic_auth(auth_header: &str) -> Option<(String, String)> {
    // Authorization: Basic <base64>
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 || parts[0] != "Basic" {
        return None;
    }

    let decoded = STANDARD.decode(parts[1]).ok()?;
    let decoded_str = String::from_utf8(decoded).ok()?;

    // Split email:password
    let (email, password) = decoded_str.split_once(':')?;

    Some((email.to_string(), password.to_string()))
}

/// Extract Bearer token from Authorization header
pub fn extract_bearer_token(auth_header: &str) -> Option<SessionToken> {
    // Authorization: Bearer <token>
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    if parts.len() != 2 || parts[0] != "Bearer" {
        return None;
    }

    Some(parts[1].to_string())
}

/// Client address as reported by a fronting proxy
pub fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .or_else(|| {
            headers
                .get("X-Real-IP")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = extract_bearer_token(auth_header).ok_or_else(|| {
            ApiError::unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
        })?;

        let user = state
            .auth_service
            .validate_token(&token)
            .await
            .map_err(|_| ApiError::unauthorized("Session not found or expired"))?;

        Ok(Self { user, token })
    }
}

/// Anonymous when the header is absent, rejected when it is present but invalid
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(None);
        }

        <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_basic_auth() {
        let header = format!("Basic {}", STANDARD.encode("admin@quire.local:password123"));
        let (email, password) = extract_basic_auth(&header).unwrap();
        assert_eq!(email, "admin@quire.local");
        assert_eq!(password, "password123");

        assert!(extract_basic_auth("Bearer token123").is_none());
        assert!(extract_basic_auth("Basic").is_none());
        assert!(extract_basic_auth("invalid").is_none());
    }

    #[test]
    fn test_extract_basic_auth_with_colon_in_password() {
        let header = format!("Basic {}", STANDARD.encode("a@b.c:pass:word:123"));
        let (_, password) = extract_basic_auth(&header).unwrap();
        assert_eq!(password, "pass:word:123");
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(
            extract_bearer_token("Bearer abc123def456").as_deref(),
            Some("abc123def456")
        );
        assert!(extract_bearer_token("Basic abc").is_none());
        assert!(extract_bearer_token("Bearer").is_none());
    }

    #[test]
    fn test_client_ip() {
        let mut headers = HeaderMap::new();
        assert!(client_ip(&headers).is_none());

        headers.insert("X-Real-IP", HeaderValue::from_static("10.0.0.2"));
        assert_eq!(client_ip(&headers).as_deref(), Some("10.0.0.2"));

        headers.insert("X-Forwarded-For", HeaderValue::from_static("10.0.0.1, 10.0.0.9"));
        assert_eq!(client_ip(&headers).as_deref(), Some("10.0.0.1"));
    }
}
