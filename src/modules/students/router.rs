use crate::modules::students::controller::{
    change_student_status, create_student, delete_student, get_active_students, get_student,
    get_students, get_students_by_status, restore_student, search_students, soft_delete_student,
    update_student, verify_email,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_student).get(get_students))
        .route("/active", get(get_active_students))
        .route("/status/{status}", get(get_students_by_status))
        .route("/search", get(search_students))
        .route(
            "/{id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/{id}/soft-delete", post(soft_delete_student))
        .route("/{id}/restore", post(restore_student))
        .route("/{id}/change-status", post(change_student_status))
        .route("/{id}/verify-email", post(verify_email))
}
