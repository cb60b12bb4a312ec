use crate::error::ApiError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// `Json` extractor whose rejections render as `{"error": ...}` with status 400
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidJson(value)),
            Err(rejection) => Err(ApiError::bad_request(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{header, StatusCode}};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        qty: i64,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ValidJson(payload) = ValidJson::<Payload>::from_request(json_request(r#"{"qty": 3}"#), &())
            .await
            .unwrap();
        assert_eq!(payload.qty, 3);
    }

    #[tokio::test]
    async fn test_invalid_body_is_bad_request() {
        let err = ValidJson::<Payload>::from_request(json_request(r#"{"qty": "three"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let missing_type = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(r#"{"qty": 3}"#))
            .unwrap();
        let err = ValidJson::<Payload>::from_request(missing_type, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
