use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Upper bound on accepted request bodies.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

/// JSON body extractor with Problem Details errors.
///
/// Unparseable JSON is a 400 `BAD_REQUEST`. Well-formed JSON of the wrong
/// shape (missing field, wrong type, bad UUID or timestamp) is a 422
/// `VALIDATION_ERROR` naming the offending field.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;

                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(category = ?e.classify(), body_size = body.len(), "JSON body rejected");
                    json_error_to_app_error(&e)
                })
        })
    }
}

fn json_error_to_app_error(error: &JsonError) -> AppError {
    match error.classify() {
        Category::Syntax => AppError::bad_request(
            ErrorCode::BadRequest,
            format!("Invalid JSON at line {}", error.line()),
        ),
        Category::Eof => {
            AppError::bad_request(ErrorCode::BadRequest, "Invalid JSON: unexpected end of input")
        }
        Category::Io => AppError::bad_request(
            ErrorCode::BadRequest,
            "Invalid JSON: I/O error while reading body",
        ),
        Category::Data => AppError::invalid(format!("Invalid request body: {error}")),
    }
}
