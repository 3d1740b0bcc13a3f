use actix_web::{post, web, HttpResponse};
use serde::Serialize;

use crate::{
    app_state::AppState,
    auth::JwtService,
    errors::AppError,
    models::dto::request::DevTokenRequest,
};

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub username: String,
}

/// Local stand-in for the external auth provider. Mints a token for an
/// existing user so the API can be exercised without the provider running.
/// Gated behind `ENABLE_DEV_TOKEN` and rejected outright otherwise.
#[post("/api/auth/dev-token")]
async fn dev_token(
    state: web::Data<AppState>,
    jwt_service: web::Data<JwtService>,
    request: web::Json<DevTokenRequest>,
) -> Result<HttpResponse, AppError> {
    if !state.config.enable_dev_token {
        return Err(AppError::Forbidden(
            "Token minting is disabled; use the auth provider".to_string(),
        ));
    }

    let user = state.user_service.find_user(&request.username).await?;
    let token = jwt_service.create_token(&user)?;

    log::warn!("minted dev token for '{}'", user.username);
    Ok(HttpResponse::Ok().json(TokenResponse {
        token,
        username: user.username,
    }))
}
