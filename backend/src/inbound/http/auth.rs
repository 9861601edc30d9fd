//! Authentication endpoints.
//!
//! ```text
//! POST /api/v1/auth/register
//! POST /api/v1/auth/login
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/profile
//! PUT  /api/v1/auth/profile
//! POST /api/v1/auth/forgot-password
//! POST /api/v1/auth/reset-password
//! ```
//!
//! All endpoints answer the `{success, message, data?, errors?}` envelope.
//! Unlike product browsing, these surfaces do report failures explicitly.

use actix_session::Session;
use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::auth::{AccountProfile, NewAccount, ProfileUpdate};

use super::error::{ApiError, ApiResponse, ApiResult, MessageResponse};
use super::session::{SESSION_USER_KEY, require_user_id};
use super::state::AppState;

/// Login credentials.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// Forgot-password input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordRequest {
    /// Address to send the reset link to.
    pub email: String,
}

/// Reset-password input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    /// One-shot token from the reset link.
    pub token: String,
    /// New password.
    pub password: String,
    /// Confirmation that must match `password`.
    pub password_confirmation: String,
}

fn establish_session(session: &Session, profile: &AccountProfile) -> Result<(), ApiError> {
    session.renew();
    session
        .insert(SESSION_USER_KEY, profile.id)
        .map_err(|error| ApiError::internal(format!("session not storable: {error}")))
}

/// Register a new account and open a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = NewAccount,
    responses(
        (status = 201, description = "Account created", body = AccountProfile),
        (status = 422, description = "Validation failed")
    ),
    tags = ["auth"],
    operation_id = "register"
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<NewAccount>,
) -> ApiResult<HttpResponse> {
    let profile = state.accounts.register(&body)?;
    establish_session(&session, &profile)?;
    info!(account = %profile.id, "account registered");
    Ok(HttpResponse::Created().json(ApiResponse::with_message("Account created.", profile)))
}

/// Authenticate and open a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AccountProfile),
        (status = 401, description = "Invalid credentials")
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let profile = state.accounts.login(&body.email, &body.password)?;
    establish_session(&session, &profile)?;
    info!(account = %profile.id, "login");
    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Logged in.", profile)))
}

/// Close the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: Session) -> ApiResult<HttpResponse> {
    session.purge();
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out.")))
}

/// Read the authenticated profile.
#[utoipa::path(
    get,
    path = "/api/v1/auth/profile",
    responses(
        (status = 200, description = "The profile", body = AccountProfile),
        (status = 401, description = "Not authenticated")
    ),
    tags = ["auth"],
    operation_id = "getProfile"
)]
#[get("/auth/profile")]
pub async fn get_profile(
    state: web::Data<AppState>,
    session: Session,
) -> ApiResult<HttpResponse> {
    let user_id = require_user_id(&session)?;
    let profile = state
        .accounts
        .profile(user_id)
        .ok_or_else(|| ApiError::not_found("Account not found."))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}

/// Update the authenticated profile.
#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = AccountProfile),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Validation failed")
    ),
    tags = ["auth"],
    operation_id = "updateProfile"
)]
#[put("/auth/profile")]
pub async fn update_profile(
    state: web::Data<AppState>,
    session: Session,
    body: web::Json<ProfileUpdate>,
) -> ApiResult<HttpResponse> {
    let user_id = require_user_id(&session)?;
    let profile = state.accounts.update_profile(user_id, &body)?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Profile updated.", profile)))
}

/// Start a password reset.
///
/// Always answers success so the endpoint cannot be used to probe which
/// addresses exist. Without an outbound mailer the token is only logged.
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset initiated", body = MessageResponse)
    ),
    tags = ["auth"],
    operation_id = "forgotPassword"
)]
#[post("/auth/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    body: web::Json<ForgotPasswordRequest>,
) -> ApiResult<HttpResponse> {
    if let Some(token) = state.accounts.issue_reset_token(&body.email) {
        info!(email = %body.email, token, "password reset token issued");
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new(
        "If this address is registered, a reset link has been sent.",
    )))
}

/// Complete a password reset.
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 422, description = "Invalid token or weak password")
    ),
    tags = ["auth"],
    operation_id = "resetPassword"
)]
#[post("/auth/reset-password")]
pub async fn reset_password(
    state: web::Data<AppState>,
    body: web::Json<ResetPasswordRequest>,
) -> ApiResult<HttpResponse> {
    state
        .accounts
        .reset_password(&body.token, &body.password, &body.password_confirmation)?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successfully.")))
}
