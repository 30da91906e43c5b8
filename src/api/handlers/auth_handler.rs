//! Authentication handlers: login, logout, setup and reset flows.

use axum::{
    extract::State,
    response::Json,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::AUTH_COOKIE_NAME;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jean@armurerie.local")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password reset request (step 1: ask for the email link)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jean@armurerie.local")]
    pub email: String,
}

/// Password reset completion (step 2: token + new password)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteResetRequest {
    /// Reset token from the emailed link
    pub token: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(min_length = 8)]
    pub password: String,
}

/// Account setup completion
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CompleteSetupRequest {
    /// Setup token from the emailed link
    pub token: String,
    /// Chosen password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(min_length = 8)]
    pub password: String,
    /// Optional in-game username
    pub username: Option<String>,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/reset", post(request_reset).put(complete_reset))
        .route("/setup", post(complete_setup))
}

fn session_cookie(token: &str, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .build()
}

/// Login with email and password
///
/// Returns the session JWT and also sets it as an HTTP-only cookie, so
/// both API clients and browsers use the same session mechanism.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<TokenResponse>)> {
    let token = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let jar = jar.add(session_cookie(&token.access_token, token.expires_in));
    Ok((jar, Json(token)))
}

/// Logout by clearing the session cookie
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse)
    )
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.remove(Cookie::from(AUTH_COOKIE_NAME));
    (jar, Json(MessageResponse::new("Logged out")))
}

/// Request a password-reset link by email
///
/// Always answers with the same message, whether or not the address
/// matches an account.
#[utoipa::path(
    post,
    path = "/api/auth/reset",
    tag = "Authentication",
    request_body = ResetRequest,
    responses(
        (status = 200, description = "Reset link sent if the account exists", body = MessageResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn request_reset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.request_password_reset(payload.email).await?;
    Ok(Json(MessageResponse::new(
        "If this email matches an account, a reset link has been sent",
    )))
}

/// Complete a password reset with the emailed token
#[utoipa::path(
    put,
    path = "/api/auth/reset",
    tag = "Authentication",
    request_body = CompleteResetRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn complete_reset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CompleteResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .user_service
        .complete_password_reset(payload.token, payload.password)
        .await?;
    Ok(Json(MessageResponse::new("Password updated")))
}

/// Complete account setup with the emailed token
#[utoipa::path(
    post,
    path = "/api/auth/setup",
    tag = "Authentication",
    request_body = CompleteSetupRequest,
    responses(
        (status = 200, description = "Account activated", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn complete_setup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CompleteSetupRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .user_service
        .complete_setup(payload.token, payload.password, payload.username)
        .await?;
    Ok(Json(MessageResponse::new("Account activated")))
}
