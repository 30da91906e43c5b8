//! API-level tests using mock services.
//!
//! These exercise the crate's public types and service contracts without
//! a database connection.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use armurerie::domain::{Permission, Role, User};
use armurerie::errors::{AppError, AppResult};
use armurerie::services::{AuthService, Claims, TokenResponse};
use armurerie::types::{Created, NoContent, Paginated};

// =============================================================================
// Mock services
// =============================================================================

/// Auth service that accepts exactly one token.
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn login(&self, email: String, _password: String) -> AppResult<TokenResponse> {
        if email == "jean@armurerie.local" {
            Ok(TokenResponse {
                access_token: "mock-token".to_string(),
                token_type: "Bearer".to_string(),
                expires_in: 86400,
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: 1,
                email: "jean@armurerie.local".to_string(),
                role: "EMPLOYEE".to_string(),
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthorized)
        }
    }
}

fn sample_user(role: Role) -> User {
    User {
        id: 1,
        name: "Jean Dupont".to_string(),
        email: "jean@armurerie.local".to_string(),
        username: None,
        password_hash: "hashed".to_string(),
        role,
        color: Some("#3498DB".to_string()),
        commission: 20,
        contract_url: None,
        last_login: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted: false,
        deleted_at: None,
    }
}

// =============================================================================
// Error envelope
// =============================================================================

#[tokio::test]
async fn test_error_status_codes() {
    assert_eq!(
        AppError::NotFound.into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::InvalidCredentials.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::conflict("User").into_response().status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::validation("bad input").into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::internal("boom").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_response_helper_status_codes() {
    let created = Created(serde_json::json!({"id": 1}));
    assert_eq!(created.into_response().status(), StatusCode::CREATED);

    assert_eq!(NoContent.into_response().status(), StatusCode::NO_CONTENT);
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_pagination_meta() {
    let page: Paginated<i32> = Paginated::new(vec![1, 2, 3], 1, 10, 23);
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.page_size, 10);
    assert_eq!(page.meta.total, 23);
    assert_eq!(page.meta.total_pages, 3);
}

#[tokio::test]
async fn test_pagination_meta_exact_fit() {
    let page: Paginated<i32> = Paginated::new(vec![], 2, 10, 20);
    assert_eq!(page.meta.total_pages, 2);

    let empty: Paginated<i32> = Paginated::new(vec![], 1, 10, 0);
    assert_eq!(empty.meta.total_pages, 0);
}

// =============================================================================
// Domain model
// =============================================================================

#[tokio::test]
async fn test_role_display_round_trip() {
    assert_eq!(Role::CoPatron.to_string(), "CO_PATRON");
    assert_eq!("CO_PATRON".parse::<Role>(), Ok(Role::CoPatron));
    assert!("MANAGER".parse::<Role>().is_err());
}

#[tokio::test]
async fn test_admin_tier_spans_three_roles() {
    assert!(sample_user(Role::Patron).is_admin());
    assert!(sample_user(Role::CoPatron).is_admin());
    assert!(sample_user(Role::Developer).is_admin());
    assert!(!sample_user(Role::Employee).is_admin());
}

#[tokio::test]
async fn test_developer_short_circuits_permissions() {
    for permission in [
        Permission::ManageUsers,
        Permission::ManageWeapons,
        Permission::ManageBaseWeapons,
        Permission::ManageFeedback,
        Permission::SystemAdmin,
    ] {
        assert!(Role::Developer.has_permission(permission));
    }
    assert!(!Role::Employee.has_permission(Permission::ManageWeapons));
}

// =============================================================================
// Password hashing
// =============================================================================

#[tokio::test]
async fn test_password_hash_and_verify() {
    use armurerie::domain::Password;

    let password = Password::new("secure_password_123").expect("hashing should succeed");
    let hash = password.into_string();
    assert_ne!(hash, "secure_password_123");

    let stored = Password::from_hash(hash);
    assert!(stored.verify("secure_password_123"));
    assert!(!stored.verify("wrong_password"));
}

#[tokio::test]
async fn test_password_hashes_are_salted() {
    use armurerie::domain::Password;

    let one = Password::new("same_password").expect("hashing should succeed");
    let two = Password::new("same_password").expect("hashing should succeed");
    assert_ne!(one.into_string(), two.into_string());
}

// =============================================================================
// Session claims and mock auth flow
// =============================================================================

#[tokio::test]
async fn test_claims_expiry_after_issue() {
    let claims = Claims {
        sub: 1,
        email: "jean@armurerie.local".to_string(),
        role: "PATRON".to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_mock_login_returns_bearer_token() {
    let service = MockAuthService;
    let token = service
        .login("jean@armurerie.local".to_string(), "password123".to_string())
        .await
        .expect("login should succeed");

    assert_eq!(token.token_type, "Bearer");
    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn test_mock_login_rejects_unknown_email() {
    let service = MockAuthService;
    let result = service
        .login("nobody@armurerie.local".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_mock_verify_token() {
    let service = MockAuthService;

    let claims = service.verify_token("valid-test-token").expect("valid token");
    assert_eq!(claims.sub, 1);

    let err = service.verify_token("garbage").unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
}
