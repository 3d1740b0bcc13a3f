use actix_web::{delete, get, post, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CreateCourseRequest, PaginationParams},
};

#[post("/api/courses")]
async fn create_course(
    state: web::Data<AppState>,
    request: web::Json<CreateCourseRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let course = state
        .course_service
        .create_course(&auth.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(course))
}

#[get("/api/courses")]
async fn list_courses(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let (courses, total) = state
        .course_service
        .list_courses(pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "items": courses, "total": total })))
}

#[get("/api/courses/{course_id}")]
async fn get_course(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let course = state.course_service.get_course(&course_id).await?;
    Ok(HttpResponse::Ok().json(course))
}

#[delete("/api/courses/{course_id}")]
async fn delete_course(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .course_service
        .delete_course(&auth.0, &course_id)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Course deleted" })))
}

#[post("/api/courses/{course_id}/enroll")]
async fn enroll(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let enrollment = state.course_service.enroll(&auth.0, &course_id).await?;
    Ok(HttpResponse::Created().json(enrollment))
}
