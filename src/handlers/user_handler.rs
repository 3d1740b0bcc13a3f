use actix_web::{delete, get, post, put, web, HttpResponse};
use serde_json::json;

use crate::{
    app_state::AppState,
    auth::{require_admin, require_self_or_admin, AuthenticatedUser},
    errors::AppError,
    models::dto::request::{CreateUserRequest, PaginationParams, UpdateUserRequest},
};

#[post("/api/users")]
async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let response = state.user_service.create_user(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[get("/api/users/{username}")]
async fn get_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_self_or_admin(&auth.0, &username)?;

    let user = state.user_service.get_user(&username).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[get("/api/users")]
async fn get_all_users(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    let pagination = query.into_inner();
    let (users, total) = state
        .user_service
        .list_users(pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "items": users, "total": total })))
}

#[put("/api/users/{username}")]
async fn update_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    request: web::Json<UpdateUserRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_self_or_admin(&auth.0, &username)?;

    let response = state
        .user_service
        .update_user(&username, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/api/users/{username}")]
async fn delete_user(
    state: web::Data<AppState>,
    username: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    require_admin(&auth.0)?;

    state.user_service.delete_user(&username).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted" })))
}

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/live")]
async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.db.health_check().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if db_health.is_ok() {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
