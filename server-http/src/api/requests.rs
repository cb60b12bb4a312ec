use quire::auth::{Role, UserUpdate};
use quire::cart::{AddItem, AdjustMode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Honoured only when an admin registers the account
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AddItemRequest {
    pub book_id: u64,
    pub qty: i64,
}

impl From<AddItemRequest> for AddItem {
    fn from(req: AddItemRequest) -> Self {
        AddItem {
            book_id: req.book_id,
            qty: req.qty,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
pub struct AdjustQuantityRequest {
    pub mode: AdjustMode,
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReplaceCartRequest {
    pub items: Vec<AddItemRequest>,
}
