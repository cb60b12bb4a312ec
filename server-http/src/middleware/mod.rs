pub mod authentication;
pub mod authorization;

pub use authentication::CurrentUser;
pub use authorization::{check_permission, check_self_or_permission};
