use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::claims::ClaimSet;
use crate::error::AppError;
use crate::extractors::{ValidatedJson, VerifiedClaims};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: ClaimSet,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: ClaimSet,
}

/// POST /auth/verify
async fn verify(
    body: ValidatedJson<VerifyRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claims = app_state.verifier.verify(&body.token).await?;

    Ok(HttpResponse::Ok().json(VerifyResponse {
        valid: true,
        user: claims,
    }))
}

/// GET /auth/userinfo
async fn userinfo(claims: VerifiedClaims) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(UserInfoResponse {
        user: claims.into_inner(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/verify").route(web::post().to(verify)))
        .service(web::resource("/userinfo").route(web::get().to(userinfo)));
}
