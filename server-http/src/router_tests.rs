use crate::{build_router, AppState};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shared::config::Config;
use std::collections::HashMap;
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@quire.test";
const ADMIN_PASSWORD: &str = "admin123";

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let vars: HashMap<&str, String> = HashMap::from([
        ("QUIRE_DATA_DIR", dir.path().display().to_string()),
        ("QUIRE_CART_BACKEND", "memory".to_string()),
        ("QUIRE_ADMIN_EMAIL", ADMIN_EMAIL.to_string()),
        ("QUIRE_ADMIN_PASSWORD", ADMIN_PASSWORD.to_string()),
    ]);
    let config = Config::from_lookup(|name| vars.get(name).cloned());

    let db = sled::open(dir.path().join("quire.sled")).unwrap();
    let state = AppState::open(&config, db).await.unwrap();
    (build_router(state, &config), dir)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

async fn customer_token(app: &Router) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({
            "name": "Reader",
            "email": "reader@quire.test",
            "password": "pages42"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, "reader@quire.test", "pages42").await
}

async fn create_book(app: &Router, admin: &str, title: &str, price: i64) -> u64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/books",
        Some(admin),
        Some(json!({ "title": title, "author": "Anon", "price": price })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_u64().unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn test_login_and_logout() {
    let (app, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(token.len(), 64);

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/v1/books", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": "wrong-pass1" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (app, _dir) = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/cart", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_customer_cannot_create_book() {
    let (app, _dir) = test_app().await;
    let token = customer_token(&app).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(&token),
        Some(json!({ "title": "Forged", "author": "Nobody", "price": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_anonymous_cannot_register_admin() {
    let (app, _dir) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({
            "name": "Sneaky",
            "email": "sneaky@quire.test",
            "password": "sneaky99",
            "role": "admin"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_manages_catalog() {
    let (app, _dir) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, category) = send(
        &app,
        Method::POST,
        "/api/v1/categories",
        Some(&admin),
        Some(json!({ "name": "Poetry" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let category_id = category["id"].as_u64().unwrap();

    let (status, book) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(&admin),
        Some(json!({
            "title": "Leaves of Grass",
            "author": "Walt Whitman",
            "price": 1200,
            "rating": 5,
            "category_id": category_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(book["category"]["name"], "Poetry");

    let (status, details) = send(
        &app,
        Method::GET,
        &format!("/api/v1/categories/{}", category_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["books"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/categories/{}", category_id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_book_is_bad_request() {
    let (app, _dir) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(&admin),
        Some(json!({ "title": "Cheap", "author": "Anon", "price": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/books",
        Some(&admin),
        Some(json!({ "title": "No price" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_customer_cart_flow() {
    let (app, _dir) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let first = create_book(&app, &admin, "Dune", 50).await;
    let second = create_book(&app, &admin, "Emma", 20).await;
    let customer = customer_token(&app).await;

    let (status, cart) = send(
        &app,
        Method::POST,
        "/api/v1/cart/items",
        Some(&customer),
        Some(json!({ "book_id": first, "qty": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["total_qty"], 2);
    assert_eq!(cart["total_price"], 100);

    let (status, cart) = send(
        &app,
        Method::POST,
        "/api/v1/cart/items",
        Some(&customer),
        Some(json!({ "book_id": second, "qty": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["total_price"], 120);

    let (status, cart) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/cart/items/{}", first),
        Some(&customer),
        Some(json!({ "qty": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["total_price"], 70);

    let (status, cart) = send(
        &app,
        Method::POST,
        &format!("/api/v1/cart/items/{}/adjust", second),
        Some(&customer),
        Some(json!({ "mode": "increase", "qty": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["total_qty"], 4);

    let (status, cart) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/cart/items/{}", first),
        Some(&customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"][0]["book_id"], second);
    assert_eq!(cart["items"][0]["line_total"], 60);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/cart", Some(&customer), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, cart) = send(&app, Method::GET, "/api/v1/cart", Some(&customer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total_price"], 0);
}

#[tokio::test]
async fn test_cart_rejects_bad_input() {
    let (app, _dir) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let book = create_book(&app, &admin, "Ulysses", 30).await;
    let customer = customer_token(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/cart/items",
        Some(&customer),
        Some(json!({ "book_id": book, "qty": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Quantity"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/cart/items",
        Some(&customer),
        Some(json!({ "book_id": book, "qty": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/cart/items",
        Some(&customer),
        Some(json!({ "book_id": 9999, "qty": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/cart/items/{}", book),
        Some(&customer),
        Some(json!({ "qty": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_all_items() {
    let (app, _dir) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let first = create_book(&app, &admin, "Beloved", 15).await;
    let second = create_book(&app, &admin, "Hamlet", 5).await;
    let customer = customer_token(&app).await;

    let (status, cart) = send(
        &app,
        Method::PUT,
        "/api/v1/cart/items",
        Some(&customer),
        Some(json!({ "items": [
            { "book_id": first, "qty": 1 },
            { "book_id": second, "qty": 2 },
            { "book_id": first, "qty": 1 }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["total_qty"], 4);
    assert_eq!(cart["total_price"], 40);
}

#[tokio::test]
async fn test_customer_sees_only_own_account() {
    let (app, _dir) = test_app().await;
    let customer = customer_token(&app).await;

    let (status, _) = send(&app, Method::GET, "/api/v1/users", Some(&customer), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, admin) = send(&app, Method::GET, "/api/v1/users/1", Some(&customer), None).await;
    // The admin is seeded first, so id 1 belongs to someone else
    assert_eq!(status, StatusCode::FORBIDDEN, "{}", admin);
}
