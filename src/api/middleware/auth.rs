//! JWT authentication middleware.
//!
//! One authentication path for the whole API: the session JWT is read
//! from the Authorization header or from the session cookie, verified,
//! and resolved to the live user row. Both transports carry the same
//! token and go through the same checks.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::api::AppState;
use crate::config::{AUTH_COOKIE_NAME, BEARER_TOKEN_PREFIX};
use crate::domain::{Permission, Role};
use crate::errors::AppError;

/// Authenticated user resolved from the session token.
///
/// Role and name come from the database, not the token, so role changes
/// and soft-deletion take effect on the next request.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl CurrentUser {
    /// Admin tier: PATRON, CO_PATRON or DEVELOPER.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Pull the session token from the Authorization header, falling back
/// to the session cookie.
fn extract_token(request: &Request, jar: &CookieJar) -> Option<String> {
    if let Some(header) = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = header.strip_prefix(BEARER_TOKEN_PREFIX) {
            return Some(token.to_string());
        }
    }

    jar.get(AUTH_COOKIE_NAME).map(|c| c.value().to_string())
}

/// JWT authentication middleware.
///
/// Verifies the session token, loads the account, and injects the
/// CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request, &jar).ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(&token)?;

    // Soft-deleted accounts fail this lookup and lose access immediately.
    let user = state
        .user_service
        .get_user(claims.sub)
        .await
        .map_err(|_| AppError::Unauthorized)?;

    let current_user = CurrentUser {
        id: user.id,
        email: user.email,
        name: user.name,
        role: user.role,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require admin tier, returns Forbidden error if not admin.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require the DEVELOPER role.
pub fn require_developer(user: &CurrentUser) -> Result<(), AppError> {
    if user.role.is_system_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Require a specific permission from the role table.
pub fn require_permission(user: &CurrentUser, permission: Permission) -> Result<(), AppError> {
    if user.role.has_permission(permission) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_role(role: Role) -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "u@armurerie.local".to_string(),
            name: "U".to_string(),
            role,
        }
    }

    #[test]
    fn admin_tiers() {
        assert!(require_admin(&user_with_role(Role::Patron)).is_ok());
        assert!(require_admin(&user_with_role(Role::CoPatron)).is_ok());
        assert!(require_admin(&user_with_role(Role::Developer)).is_ok());
        assert!(require_admin(&user_with_role(Role::Employee)).is_err());
    }

    #[test]
    fn developer_gate() {
        assert!(require_developer(&user_with_role(Role::Developer)).is_ok());
        assert!(require_developer(&user_with_role(Role::Patron)).is_err());
    }

    #[test]
    fn permission_gate_uses_role_table() {
        assert!(require_permission(&user_with_role(Role::Patron), Permission::ManageUsers).is_ok());
        assert!(
            require_permission(&user_with_role(Role::Employee), Permission::ManageUsers).is_err()
        );
        assert!(
            require_permission(&user_with_role(Role::Developer), Permission::SystemAdmin).is_ok()
        );
    }
}
