use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

/// Completion is gated client-side by the progress tracker; the server
/// records the issue request and returns the certificate data for the
/// client-side document renderer.
#[post("/api/courses/{course_id}/certificate")]
async fn issue_certificate(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let certificate = state
        .certificate_service
        .issue(&auth.0, &course_id)
        .await?;
    Ok(HttpResponse::Created().json(certificate))
}

#[get("/api/user/certificates")]
async fn list_certificates(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let certificates = state.certificate_service.list_for_user(&auth.0).await?;
    Ok(HttpResponse::Ok().json(certificates))
}
