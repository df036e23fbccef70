use crate::modules::students::model::{
    ChangeStatusDto, CreateStudentDto, ProfileStatus, STUDENT_COLUMNS, Student, UpdateStudentDto,
};
use crate::utils::credential::encode_password;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;
use anyhow::Context;
use sqlx::PgPool;
use tracing::instrument;

pub struct StudentService;

impl StudentService {
    /// Create a student. The password is encoded immediately with the
    /// new record's mobile number as salt; lifecycle flags start as
    /// `email_verified = false`, `deleted = false`, `active` regardless
    /// of what the caller sends.
    #[instrument(skip(db, dto, codec_key))]
    pub async fn create_student(
        db: &PgPool,
        dto: CreateStudentDto,
        codec_key: &str,
    ) -> Result<Student, AppError> {
        let token = encode_password(&dto.password, &dto.mobile_no, codec_key);

        let sql = format!(
            "INSERT INTO students \
                 (name, country_code, mobile_no, email, education, college, address_state, \
                  address, password, device_id, password_updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW()) \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&dto.name)
            .bind(dto.country_code)
            .bind(&dto.mobile_no)
            .bind(&dto.email)
            .bind(&dto.education)
            .bind(&dto.college)
            .bind(&dto.address_state)
            .bind(&dto.address)
            .bind(&token)
            .bind(&dto.device_id)
            .fetch_one(db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::bad_request(anyhow::anyhow!(
                            "Student with email {} already exists",
                            dto.email
                        ));
                    }
                }
                AppError::database(anyhow::Error::from(e))
            })?;

        Ok(student)
    }

    /// List students, optionally filtered by profile status. No status
    /// filter means everything in the table, deleted rows included.
    #[instrument(skip(db, params))]
    pub async fn list_students(
        db: &PgPool,
        status: Option<ProfileStatus>,
        params: &PaginationParams,
    ) -> Result<(Vec<Student>, i64), AppError> {
        let (count_sql, list_sql) = match status {
            Some(_) => (
                "SELECT COUNT(*) FROM students WHERE profile_status = $1".to_string(),
                format!(
                    "SELECT {STUDENT_COLUMNS} FROM students WHERE profile_status = $1 \
                     ORDER BY student_id LIMIT $2 OFFSET $3"
                ),
            ),
            None => (
                "SELECT COUNT(*) FROM students".to_string(),
                format!(
                    "SELECT {STUDENT_COLUMNS} FROM students ORDER BY student_id \
                     LIMIT $1 OFFSET $2"
                ),
            ),
        };

        let (total, students) = match status {
            Some(status) => {
                let total: (i64,) = sqlx::query_as(&count_sql)
                    .bind(status.as_str())
                    .fetch_one(db)
                    .await
                    .context("Failed to count students")
                    .map_err(AppError::database)?;

                let students = sqlx::query_as::<_, Student>(&list_sql)
                    .bind(status.as_str())
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(db)
                    .await
                    .context("Failed to fetch students")
                    .map_err(AppError::database)?;

                (total, students)
            }
            None => {
                let total: (i64,) = sqlx::query_as(&count_sql)
                    .fetch_one(db)
                    .await
                    .context("Failed to count students")
                    .map_err(AppError::database)?;

                let students = sqlx::query_as::<_, Student>(&list_sql)
                    .bind(params.limit())
                    .bind(params.offset())
                    .fetch_all(db)
                    .await
                    .context("Failed to fetch students")
                    .map_err(AppError::database)?;

                (total, students)
            }
        };

        Ok((students, total.0))
    }

    /// Case-insensitive substring search over name, email and college.
    #[instrument(skip(db))]
    pub async fn search_students(db: &PgPool, query: &str) -> Result<Vec<Student>, AppError> {
        let pattern = format!("%{query}%");
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students \
             WHERE name ILIKE $1 OR email ILIKE $1 OR college ILIKE $1 \
             ORDER BY student_id"
        );

        let students = sqlx::query_as::<_, Student>(&sql)
            .bind(&pattern)
            .fetch_all(db)
            .await
            .context("Failed to search students")
            .map_err(AppError::database)?;

        Ok(students)
    }

    /// Fetch by id. Returns the record even when inactive or soft-deleted.
    #[instrument(skip(db))]
    pub async fn get_student(db: &PgPool, student_id: i64) -> Result<Student, AppError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1");

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(student_id)
            .fetch_optional(db)
            .await
            .context("Failed to fetch student by ID")
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        Ok(student)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_student(
        db: &PgPool,
        student_id: i64,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        if dto.mobile_no.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "mobile_no cannot be changed: it salts the stored password token"
            )));
        }

        let existing = Self::get_student(db, student_id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let country_code = dto.country_code.unwrap_or(existing.country_code);
        let education = dto.education.unwrap_or(existing.education);
        let college = dto.college.or(existing.college);
        let address_state = dto.address_state.or(existing.address_state);
        let address = dto.address.or(existing.address);
        let profile_status = dto
            .profile_status
            .map(|s| s.as_str().to_string())
            .unwrap_or(existing.profile_status);
        let device_id = dto.device_id.or(existing.device_id);

        let sql = format!(
            "UPDATE students \
             SET name = $1, country_code = $2, education = $3, college = $4, \
                 address_state = $5, address = $6, profile_status = $7, device_id = $8, \
                 updated_at = NOW() \
             WHERE student_id = $9 \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(&name)
            .bind(country_code)
            .bind(&education)
            .bind(&college)
            .bind(&address_state)
            .bind(&address)
            .bind(&profile_status)
            .bind(&device_id)
            .bind(student_id)
            .fetch_one(db)
            .await
            .context("Failed to update student")
            .map_err(AppError::database)?;

        Ok(student)
    }

    /// Hard delete: the row is gone permanently.
    #[instrument(skip(db))]
    pub async fn delete_student(db: &PgPool, student_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id)
            .execute(db)
            .await
            .context("Failed to delete student")
            .map_err(AppError::database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        Ok(())
    }

    /// Soft delete: flips the flag and forces `inactive`, keeping the row.
    #[instrument(skip(db))]
    pub async fn soft_delete_student(db: &PgPool, student_id: i64) -> Result<Student, AppError> {
        let existing = Self::get_student(db, student_id).await?;

        if existing.deleted {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student is already deleted"
            )));
        }

        let sql = format!(
            "UPDATE students \
             SET deleted = TRUE, profile_status = 'inactive', updated_at = NOW() \
             WHERE student_id = $1 \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(student_id)
            .fetch_one(db)
            .await
            .context("Failed to soft delete student")
            .map_err(AppError::database)?;

        Ok(student)
    }

    #[instrument(skip(db))]
    pub async fn restore_student(db: &PgPool, student_id: i64) -> Result<Student, AppError> {
        let existing = Self::get_student(db, student_id).await?;

        if !existing.deleted {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student is not deleted"
            )));
        }

        let sql = format!(
            "UPDATE students \
             SET deleted = FALSE, profile_status = 'active', updated_at = NOW() \
             WHERE student_id = $1 \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(student_id)
            .fetch_one(db)
            .await
            .context("Failed to restore student")
            .map_err(AppError::database)?;

        Ok(student)
    }

    /// Change profile status. Returns the previous status alongside the
    /// updated record so the caller can report the transition.
    #[instrument(skip(db, dto))]
    pub async fn change_status(
        db: &PgPool,
        student_id: i64,
        dto: ChangeStatusDto,
    ) -> Result<(String, Student), AppError> {
        let existing = Self::get_student(db, student_id).await?;
        let old_status = existing.profile_status.clone();

        let sql = format!(
            "UPDATE students SET profile_status = $1, updated_at = NOW() \
             WHERE student_id = $2 \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(dto.status.as_str())
            .bind(student_id)
            .fetch_one(db)
            .await
            .context("Failed to change student status")
            .map_err(AppError::database)?;

        Ok((old_status, student))
    }

    #[instrument(skip(db))]
    pub async fn verify_email(db: &PgPool, student_id: i64) -> Result<Student, AppError> {
        let existing = Self::get_student(db, student_id).await?;

        if existing.email_verified {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email is already verified"
            )));
        }

        let sql = format!(
            "UPDATE students SET email_verified = TRUE, updated_at = NOW() \
             WHERE student_id = $1 \
             RETURNING {STUDENT_COLUMNS}"
        );

        let student = sqlx::query_as::<_, Student>(&sql)
            .bind(student_id)
            .fetch_one(db)
            .await
            .context("Failed to verify student email")
            .map_err(AppError::database)?;

        Ok(student)
    }
}
