pub mod auth;
pub mod books;
pub mod cart;
pub mod categories;
pub mod health;
pub mod users;

pub use auth::{login, logout};
pub use books::{create_book, delete_book, get_book, list_books, update_book};
pub use categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
pub use health::health_check;
pub use users::{delete_user, get_user, list_users, register, update_user};
