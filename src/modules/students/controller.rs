use crate::modules::auth::controller::ErrorResponse;
use crate::modules::students::model::{
    ChangeStatusDto, CreateStudentDto, PaginatedStudentsResponse, ProfileStatus, SearchParams,
    Student, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::{PaginationMeta, PaginationParams};
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use tracing::instrument;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "Bad request - email already exists", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student =
        StudentService::create_student(&state.db, dto, &state.codec_config.secret_key).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    params(PaginationParams),
    responses(
        (status = 200, description = "All students, deleted and inactive included", body = PaginatedStudentsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let (students, total) = StudentService::list_students(&state.db, None, &params).await?;

    Ok(Json(PaginatedStudentsResponse {
        meta: PaginationMeta::new(&params, total),
        data: students,
    }))
}

#[utoipa::path(
    get,
    path = "/api/students/active",
    params(PaginationParams),
    responses(
        (status = 200, description = "Active students only", body = PaginatedStudentsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_active_students(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let (students, total) =
        StudentService::list_students(&state.db, Some(ProfileStatus::Active), &params).await?;

    Ok(Json(PaginatedStudentsResponse {
        meta: PaginationMeta::new(&params, total),
        data: students,
    }))
}

#[utoipa::path(
    get,
    path = "/api/students/status/{status}",
    params(
        ("status" = String, Path, description = "active, inactive or suspended"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Students with the given status", body = PaginatedStudentsResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_students_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let status: ProfileStatus = status.parse().map_err(|_| {
        AppError::bad_request(anyhow::anyhow!(
            "Status must be one of: active, inactive, suspended"
        ))
    })?;

    let (students, total) = StudentService::list_students(&state.db, Some(status), &params).await?;

    Ok(Json(PaginatedStudentsResponse {
        meta: PaginationMeta::new(&params, total),
        data: students,
    }))
}

#[utoipa::path(
    get,
    path = "/api/students/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching students", body = Vec<Student>),
        (status = 400, description = "Missing search query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn search_students(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Student>>, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Search query parameter 'q' is required"))
        })?;

    let students = StudentService::search_students(&state.db, query).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student details", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student permanently deleted"),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(Json(
        json!({"message": "Student permanently deleted", "student_id": id}),
    ))
}

#[utoipa::path(
    post,
    path = "/api/students/{id}/soft-delete",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student soft deleted", body = Student),
        (status = 400, description = "Student is already deleted", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn soft_delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::soft_delete_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/students/{id}/restore",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student restored", body = Student),
        (status = 400, description = "Student is not deleted", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn restore_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::restore_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    post,
    path = "/api/students/{id}/change-status",
    params(("id" = i64, Path, description = "Student ID")),
    request_body = ChangeStatusDto,
    responses(
        (status = 200, description = "Status changed"),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn change_student_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<ChangeStatusDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let new_status = dto.status;
    let (old_status, student) = StudentService::change_status(&state.db, id, dto).await?;

    Ok(Json(json!({
        "message": format!("Student status changed from '{}' to '{}'", old_status, new_status),
        "old_status": old_status,
        "new_status": new_status,
        "student": student,
    })))
}

#[utoipa::path(
    post,
    path = "/api/students/{id}/verify-email",
    params(("id" = i64, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Email verified", body = Student),
        (status = 400, description = "Email is already verified", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn verify_email(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::verify_email(&state.db, id).await?;
    Ok(Json(student))
}
