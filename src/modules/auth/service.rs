use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::modules::students::model::Student;
use crate::modules::students::service::StudentService;
use crate::utils::credential::{encode_password, verify_password};
use crate::utils::errors::AppError;
use crate::utils::otp::{OtpCheck, check_otp, generate_otp};
use crate::utils::sms::SmsService;

use super::model::{ChangePasswordRequest, LoginRequest, ResetPasswordRequest, VerifyOtpRequest};

/// Minimal projection for credential checks: the only place the stored
/// token is ever read out of the table.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    student_id: i64,
    mobile_no: String,
    password: String,
}

#[derive(sqlx::FromRow)]
struct OtpRow {
    student_id: i64,
    otp: Option<String>,
    otp_sent_at: Option<DateTime<Utc>>,
}

pub struct AuthService;

impl AuthService {
    /// Login with mobile number and password. Unknown mobile and wrong
    /// password produce the identical 401 so the response does not leak
    /// which mobile numbers exist.
    #[instrument(skip(db, dto, codec_key))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        codec_key: &str,
    ) -> Result<Student, AppError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT student_id, mobile_no, password FROM students \
             WHERE mobile_no = $1 AND deleted = FALSE",
        )
        .bind(&dto.mobile_no)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::unauthorized(anyhow::anyhow!("Invalid mobile number or password"))
        })?;

        if !verify_password(&dto.password, &row.password, &row.mobile_no, codec_key) {
            return Err(AppError::unauthorized(anyhow::anyhow!(
                "Invalid mobile number or password"
            )));
        }

        info!(student_id = row.student_id, "login successful");
        StudentService::get_student(db, row.student_id).await
    }

    /// Issue a fresh OTP for the student behind `mobile_no` and hand it
    /// to the SMS channel. Overwrites any previous code, expired or not.
    #[instrument(skip(db))]
    pub async fn send_otp(db: &PgPool, mobile_no: &str) -> Result<(), AppError> {
        let student_id = Self::find_student_id(db, mobile_no).await?;
        let code = Self::issue_otp(db, student_id).await?;

        SmsService::send_otp(mobile_no, &code);
        Ok(())
    }

    /// Verify a submitted OTP. On success both stored fields are cleared
    /// atomically so the code cannot be replayed; all failures surface
    /// the reason without touching state.
    #[instrument(skip(db, dto))]
    pub async fn verify_otp(db: &PgPool, dto: VerifyOtpRequest) -> Result<Student, AppError> {
        let student_id = Self::verify_and_clear_otp(db, &dto.mobile_no, &dto.otp).await?;
        StudentService::get_student(db, student_id).await
    }

    /// Start a password reset: issues an OTP and stamps
    /// `forgot_password_sent_at`.
    #[instrument(skip(db))]
    pub async fn forgot_password(db: &PgPool, mobile_no: &str) -> Result<(), AppError> {
        let student_id = Self::find_student_id(db, mobile_no).await?;
        let code = Self::issue_otp(db, student_id).await?;

        sqlx::query("UPDATE students SET forgot_password_sent_at = NOW() WHERE student_id = $1")
            .bind(student_id)
            .execute(db)
            .await?;

        SmsService::send_otp(mobile_no, &code);
        Ok(())
    }

    /// Complete a password reset: OTP must verify, then the new password
    /// is encoded against the record's mobile number.
    #[instrument(skip(db, dto, codec_key))]
    pub async fn reset_password(
        db: &PgPool,
        dto: ResetPasswordRequest,
        codec_key: &str,
    ) -> Result<(), AppError> {
        let student_id = Self::verify_and_clear_otp(db, &dto.mobile_no, &dto.otp).await?;

        let token = encode_password(&dto.new_password, &dto.mobile_no, codec_key);
        sqlx::query(
            "UPDATE students SET password = $1, password_updated_at = NOW(), \
             updated_at = NOW() WHERE student_id = $2",
        )
        .bind(&token)
        .bind(student_id)
        .execute(db)
        .await?;

        info!(student_id, "password reset completed");
        Ok(())
    }

    /// Change password after re-checking the current one.
    #[instrument(skip(db, dto, codec_key))]
    pub async fn change_password(
        db: &PgPool,
        dto: ChangePasswordRequest,
        codec_key: &str,
    ) -> Result<(), AppError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT student_id, mobile_no, password FROM students \
             WHERE student_id = $1 AND deleted = FALSE",
        )
        .bind(dto.student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        if !verify_password(&dto.current_password, &row.password, &row.mobile_no, codec_key) {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Current password is incorrect"
            )));
        }

        let token = encode_password(&dto.new_password, &row.mobile_no, codec_key);
        sqlx::query(
            "UPDATE students SET password = $1, password_updated_at = NOW(), \
             updated_at = NOW() WHERE student_id = $2",
        )
        .bind(&token)
        .bind(row.student_id)
        .execute(db)
        .await?;

        info!(student_id = row.student_id, "password changed");
        Ok(())
    }

    async fn find_student_id(db: &PgPool, mobile_no: &str) -> Result<i64, AppError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT student_id FROM students WHERE mobile_no = $1 AND deleted = FALSE",
        )
        .bind(mobile_no)
        .fetch_optional(db)
        .await?;

        row.map(|(id,)| id)
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    async fn issue_otp(db: &PgPool, student_id: i64) -> Result<String, AppError> {
        let code = generate_otp();

        sqlx::query(
            "UPDATE students SET otp = $1, otp_sent_at = NOW(), updated_at = NOW() \
             WHERE student_id = $2",
        )
        .bind(&code)
        .bind(student_id)
        .execute(db)
        .await?;

        Ok(code)
    }

    /// The read-check-clear cycle. The clear is a compare-and-clear
    /// keyed on the code value, so of two concurrent verifies for the
    /// same code only one can win; the loser observes already-cleared
    /// state and fails like any other "not generated" case.
    async fn verify_and_clear_otp(
        db: &PgPool,
        mobile_no: &str,
        submitted: &str,
    ) -> Result<i64, AppError> {
        let row = sqlx::query_as::<_, OtpRow>(
            "SELECT student_id, otp, otp_sent_at FROM students \
             WHERE mobile_no = $1 AND deleted = FALSE",
        )
        .bind(mobile_no)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let check = check_otp(row.otp.as_deref(), row.otp_sent_at, submitted);
        if !check.is_verified() {
            // Expired codes are left in place until the next issue
            // overwrites them; invalid submissions change nothing.
            return Err(AppError::bad_request(anyhow::anyhow!("{}", check.reason())));
        }

        let cleared = sqlx::query(
            "UPDATE students SET otp = NULL, otp_sent_at = NULL, updated_at = NOW() \
             WHERE student_id = $1 AND otp = $2",
        )
        .bind(row.student_id)
        .bind(submitted)
        .execute(db)
        .await?;

        if cleared.rows_affected() == 0 {
            warn!(
                student_id = row.student_id,
                "OTP cleared by a concurrent verification"
            );
            return Err(AppError::bad_request(anyhow::anyhow!(
                "{}",
                OtpCheck::NotGenerated.reason()
            )));
        }

        Ok(row.student_id)
    }
}
