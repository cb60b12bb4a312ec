use crate::error::ApiError;
use quire::auth::{AuthService, Permission, User};
use shared::UserId;

/// Helper function to check permissions in route handlers
pub fn check_permission(
    auth_service: &AuthService,
    user: &User,
    permission: Permission,
) -> Result<(), ApiError> {
    auth_service
        .authorize(user, permission)
        .map_err(|_| ApiError::forbidden())
}

/// Users may act on their own account; anyone else needs `ManageUsers`
pub fn check_self_or_permission(
    auth_service: &AuthService,
    user: &User,
    target: UserId,
) -> Result<(), ApiError> {
    if user.id == target {
        return Ok(());
    }
    check_permission(auth_service, user, Permission::ManageUsers)
}
