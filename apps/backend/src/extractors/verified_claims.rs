use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::claims::ClaimSet;
use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::state::app_state::AppState;

/// Claims of a bearer token that passed verification.
#[derive(Debug, Clone)]
pub struct VerifiedClaims(pub ClaimSet);

impl VerifiedClaims {
    pub fn into_inner(self) -> ClaimSet {
        self.0
    }
}

impl FromRequest for VerifiedClaims {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = AuthToken::from_http_request(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let token = token?;
            let state = state.ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = state.verifier.verify(&token.token).await?;
            Ok(VerifiedClaims(claims))
        })
    }
}
