use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::students::model::Student;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 4, max = 16, message = "mobile_no must be 4-16 characters"))]
    pub mobile_no: String,
    #[validate(length(min = 1, max = 255, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub student: Student,
}

/// Shared by send-otp and forgot-password; both only need the mobile
/// number of a non-deleted record.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OtpRequest {
    #[validate(length(min = 4, max = 16, message = "mobile_no must be 4-16 characters"))]
    pub mobile_no: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 4, max = 16, message = "mobile_no must be 4-16 characters"))]
    pub mobile_no: String,
    #[validate(length(min = 1, max = 6, message = "otp must be at most 6 characters"))]
    pub otp: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 4, max = 16, message = "mobile_no must be 4-16 characters"))]
    pub mobile_no: String,
    #[validate(length(min = 1, max = 6, message = "otp must be at most 6 characters"))]
    pub otp: String,
    #[validate(length(min = 8, max = 255, message = "new_password must be 8-255 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    pub student_id: i64,
    #[validate(length(min = 1, max = 255, message = "current_password must not be empty"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 255, message = "new_password must be 8-255 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OtpSentResponse {
    pub message: String,
    pub mobile_no: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OtpVerifiedResponse {
    pub message: String,
    pub student: Student,
}
