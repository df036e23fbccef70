use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;
use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use super::model::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, OtpRequest,
    OtpSentResponse, OtpVerifiedResponse, ResetPasswordRequest, VerifyOtpRequest,
};
use super::service::AuthService;

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Login with mobile number and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let student = AuthService::login(&state.db, dto, &state.codec_config.secret_key).await?;
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        student,
    }))
}

/// Send a one-time passcode to the student's mobile
#[utoipa::path(
    post,
    path = "/api/auth/send-otp",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "OTP sent", body = OtpSentResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn send_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OtpRequest>,
) -> Result<Json<OtpSentResponse>, AppError> {
    AuthService::send_otp(&state.db, &dto.mobile_no).await?;
    Ok(Json(OtpSentResponse {
        message: "OTP sent successfully".to_string(),
        mobile_no: dto.mobile_no,
    }))
}

/// Verify a one-time passcode
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "OTP verified", body = OtpVerifiedResponse),
        (status = 400, description = "OTP not generated, expired or invalid", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn verify_otp(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<VerifyOtpRequest>,
) -> Result<Json<OtpVerifiedResponse>, AppError> {
    let student = AuthService::verify_otp(&state.db, dto).await?;
    Ok(Json(OtpVerifiedResponse {
        message: "OTP verified successfully".to_string(),
        student,
    }))
}

/// Start a password reset by sending an OTP
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    request_body = OtpRequest,
    responses(
        (status = 200, description = "Password reset OTP sent", body = OtpSentResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OtpRequest>,
) -> Result<Json<OtpSentResponse>, AppError> {
    AuthService::forgot_password(&state.db, &dto.mobile_no).await?;
    Ok(Json(OtpSentResponse {
        message: "Password reset OTP sent successfully".to_string(),
        mobile_no: dto.mobile_no,
    }))
}

/// Reset the password after OTP verification
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "OTP not generated, expired or invalid", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::reset_password(&state.db, dto, &state.codec_config.secret_key).await?;
    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}

/// Change the password with current-password verification
#[utoipa::path(
    post,
    path = "/api/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Current password is incorrect", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::change_password(&state.db, dto, &state.codec_config.secret_key).await?;
    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}
