//! Student entity and DTOs.
//!
//! The [`Student`] struct is the public projection of the `students`
//! table: the password token and OTP state never appear in it, so they
//! can never leak through a response body. Services select
//! [`STUDENT_COLUMNS`] explicitly instead of `*`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::utils::pagination::PaginationMeta;

/// Column list for the public projection. Must stay in sync with the
/// fields of [`Student`].
pub const STUDENT_COLUMNS: &str = "student_id, name, country_code, mobile_no, email, \
     email_verified, education, college, address_state, address, profile_status, deleted, \
     device_id, created_at, updated_at";

#[derive(Serialize, FromRow, Debug, Clone, PartialEq, ToSchema)]
pub struct Student {
    pub student_id: i64,
    pub name: String,
    pub country_code: i32,
    pub mobile_no: String,
    pub email: String,
    pub email_verified: bool,
    pub education: String,
    pub college: Option<String>,
    pub address_state: Option<String>,
    pub address: Option<String>,
    /// One of `active`, `inactive`, `suspended`. Stored as text in the
    /// legacy table; parsed into [`ProfileStatus`] at the API edge.
    pub profile_status: String,
    pub deleted: bool,
    pub device_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Active,
    Inactive,
    Suspended,
}

impl ProfileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileStatus::Active => "active",
            ProfileStatus::Inactive => "inactive",
            ProfileStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProfileStatus::Active),
            "inactive" => Ok(ProfileStatus::Inactive),
            "suspended" => Ok(ProfileStatus::Suspended),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 45, message = "name must be 1-45 characters"))]
    pub name: String,
    pub country_code: i32,
    #[validate(length(min = 4, max = 16, message = "mobile_no must be 4-16 characters"))]
    pub mobile_no: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 63, message = "email must be at most 63 characters")
    )]
    pub email: String,
    #[validate(length(max = 30, message = "education must be at most 30 characters"))]
    #[serde(default)]
    pub education: String,
    pub college: Option<String>,
    pub address_state: Option<String>,
    pub address: Option<String>,
    #[validate(length(min = 8, max = 255, message = "password must be 8-255 characters"))]
    pub password: String,
    pub device_id: Option<String>,
}

/// Partial update. The mobile number is deliberately absent: it salts
/// the stored password token, and changing it would orphan the token.
/// A request that still sends `mobile_no` is rejected with 400 rather
/// than silently ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 45, message = "name must be 1-45 characters"))]
    pub name: Option<String>,
    pub country_code: Option<i32>,
    #[validate(length(max = 30, message = "education must be at most 30 characters"))]
    pub education: Option<String>,
    pub college: Option<String>,
    pub address_state: Option<String>,
    pub address: Option<String>,
    pub profile_status: Option<ProfileStatus>,
    pub device_id: Option<String>,
    pub mobile_no: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeStatusDto {
    pub status: ProfileStatus,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub data: Vec<Student>,
    pub meta: PaginationMeta,
}
