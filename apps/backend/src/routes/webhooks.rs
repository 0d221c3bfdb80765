use actix_web::{web, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::collections::{handle_new_collection, CollectionEvent};

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub collection_id: Uuid,
}

/// POST /webhook/new-collection
///
/// Unauthenticated. Callers are expected to reach it over a private network.
async fn new_collection(
    event: ValidatedJson<CollectionEvent>,
) -> Result<HttpResponse, AppError> {
    let ack = handle_new_collection(&event)?;

    Ok(HttpResponse::Ok().json(WebhookAck {
        status: "success",
        collection_id: ack.collection_id,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/new-collection").route(web::post().to(new_collection)));
}
