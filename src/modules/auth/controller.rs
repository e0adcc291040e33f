use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use tracing::{instrument, warn};
use utoipa::ToSchema;

use crate::modules::users::model::User;
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::email::EmailService;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ResendVerificationRequest,
    VerifyEmailParams,
};
use super::service::AuthService;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Register a new account and send its verification link
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, verification email sent", body = User),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let (user, token) = UserService::register(state.users.as_ref(), dto).await?;

    // Delivery failures must not undo the registration; the link can be
    // reissued through /verify/resend.
    let mailer = EmailService::new(state.email_config.clone());
    if let Err(err) = mailer
        .send_verification_email(&user.email, &user.full_name, &token)
        .await
    {
        warn!(email = %user.email, %err, "failed to send verification email");
    }

    Ok((StatusCode::CREATED, Json(user.into_public())))
}

/// Login and receive a session token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.users.as_ref(), dto, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Verify an email address with the token from the verification link
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    params(("token" = String, Query, description = "Verification token from the email link")),
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 400, description = "Invalid or expired verification link", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, params))]
pub async fn verify_email(
    State(state): State<AppState>,
    Query(params): Query<VerifyEmailParams>,
) -> Result<Json<MessageResponse>, AppError> {
    UserService::consume_verification_token(state.users.as_ref(), &params.token).await?;

    Ok(Json(MessageResponse {
        message: "Email verified successfully. You can now log in.".to_string(),
    }))
}

/// Request a fresh verification link
#[utoipa::path(
    post,
    path = "/api/auth/verify/resend",
    request_body = ResendVerificationRequest,
    responses(
        (status = 200, description = "Verification email sent if an unverified account exists", body = MessageResponse),
        (status = 422, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if let Some((user, token)) =
        UserService::reissue_verification_token(state.users.as_ref(), &dto.email).await?
    {
        let mailer = EmailService::new(state.email_config.clone());
        if let Err(err) = mailer
            .send_verification_email(&user.email, &user.full_name, &token)
            .await
        {
            warn!(email = %user.email, %err, "failed to send verification email");
        }
    }

    // Same response whether or not the account exists.
    Ok(Json(MessageResponse {
        message: "If an unverified account exists for that email, a new verification link has been sent."
            .to_string(),
    }))
}
