//! HTTP route handlers.

pub mod wallet;

use crate::api::MessageResponse;
use axum::Json;

/// Liveness endpoint.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Cryptonian API!".to_string(),
    })
}
