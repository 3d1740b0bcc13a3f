use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CreateContentRequest, ReorderRequest, UpdateContentRequest},
    models::dto::response::{ContentNodeDto, DeleteResponse},
};

#[get("/api/courses/{course_id}/contents")]
async fn list_contents(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let nodes = state.content_service.list_by_course(&course_id).await?;
    Ok(HttpResponse::Ok().json(ContentNodeDto::nest(nodes)))
}

#[post("/api/courses/{course_id}/contents")]
async fn create_content(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    request: web::Json<CreateContentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let node = state
        .content_service
        .create(&auth.0, &course_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ContentNodeDto::from(node)))
}

#[put("/api/courses/{course_id}/contents/{content_id}")]
async fn update_content(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<UpdateContentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (course_id, content_id) = path.into_inner();
    let node = state
        .content_service
        .update(&auth.0, &course_id, &content_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ContentNodeDto::from(node)))
}

#[delete("/api/courses/{course_id}/contents/{content_id}")]
async fn delete_content(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (course_id, content_id) = path.into_inner();
    let deleted_count = state
        .content_service
        .delete(&auth.0, &course_id, &content_id)
        .await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Content deleted".to_string(),
        deleted_count,
    }))
}

/// Swaps the node with its neighbor; 400 when it is already at the edge of
/// its sibling group. Responds with the refreshed sibling list so the
/// sidebar re-syncs from the server instead of guessing.
#[put("/api/courses/{course_id}/contents/{content_id}/reorder")]
async fn reorder_content(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<ReorderRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (course_id, content_id) = path.into_inner();
    let siblings = state
        .content_service
        .reorder(&auth.0, &course_id, &content_id, request.direction)
        .await?;
    let siblings: Vec<ContentNodeDto> = siblings.into_iter().map(ContentNodeDto::from).collect();
    Ok(HttpResponse::Ok().json(siblings))
}
