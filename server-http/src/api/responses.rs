use chrono::{DateTime, Utc};
use quire::auth::{Role, User};
use quire::cart::{Cart, Item};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// A user without the password hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub expires_at: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub book_id: u64,
    pub price: i64,
    pub qty: i64,
    pub line_total: i64,
}

impl From<Item> for CartItemResponse {
    fn from(item: Item) -> Self {
        Self {
            line_total: item.line_total(),
            book_id: item.book_id,
            price: item.price,
            qty: item.qty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub user_id: u64,
    pub items: Vec<CartItemResponse>,
    pub total_qty: i64,
    pub total_price: i64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            user_id: cart.user_id,
            items: cart.items.into_iter().map(Into::into).collect(),
            total_qty: cart.total_qty,
            total_price: cart.total_price,
        }
    }
}
