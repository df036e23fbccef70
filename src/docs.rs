use utoipa::OpenApi;

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    ChangePasswordRequest, LoginRequest, LoginResponse, MessageResponse, OtpRequest,
    OtpSentResponse, OtpVerifiedResponse, ResetPasswordRequest, VerifyOtpRequest,
};
use crate::modules::students::model::{
    ChangeStatusDto, CreateStudentDto, PaginatedStudentsResponse, ProfileStatus, Student,
    UpdateStudentDto,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::send_otp,
        crate::modules::auth::controller::verify_otp,
        crate::modules::auth::controller::forgot_password,
        crate::modules::auth::controller::reset_password,
        crate::modules::auth::controller::change_password,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_active_students,
        crate::modules::students::controller::get_students_by_status,
        crate::modules::students::controller::search_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::soft_delete_student,
        crate::modules::students::controller::restore_student,
        crate::modules::students::controller::change_student_status,
        crate::modules::students::controller::verify_email,
    ),
    components(
        schemas(
            Student,
            ProfileStatus,
            CreateStudentDto,
            UpdateStudentDto,
            ChangeStatusDto,
            PaginatedStudentsResponse,
            PaginationMeta,
            PaginationParams,
            LoginRequest,
            LoginResponse,
            OtpRequest,
            VerifyOtpRequest,
            ResetPasswordRequest,
            ChangePasswordRequest,
            MessageResponse,
            OtpSentResponse,
            OtpVerifiedResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Authentication", description = "Mobile/password login, OTP verification and password reset"),
        (name = "Students", description = "Student record management")
    ),
    info(
        title = "Rollbook API",
        version = "0.1.0",
        description = "Student records REST API with mobile/password login and OTP verification.",
    )
)]
pub struct ApiDoc;
