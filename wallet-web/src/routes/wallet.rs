//! Wallet route handlers.

use crate::api::{ActionResponse, ConnectRequest, RedirectRequest, WalletStatus};
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

/// Record `address` as the connected wallet.
pub async fn connect_wallet(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ConnectRequest>, JsonRejection>,
) -> Result<Json<ActionResponse>, AppError> {
    let Json(request) = body?;

    if request.address.is_empty() {
        return Err(AppError::BadRequest(
            "wallet address must not be empty".to_string(),
        ));
    }

    state.store.set(&request.address).await?;
    tracing::info!(address = %request.address, "Wallet connected");

    Ok(Json(ActionResponse::success("Wallet connected successfully")))
}

/// Current wallet connection state.
pub async fn wallet_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WalletStatus>, AppError> {
    let record = state.store.get().await?;
    Ok(Json(WalletStatus::from(record)))
}

/// Forget the connected wallet.
pub async fn disconnect_wallet(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ActionResponse>, AppError> {
    state.store.clear().await?;
    tracing::info!("Wallet disconnected");

    Ok(Json(ActionResponse::success("Wallet disconnected successfully")))
}

/// Forget the connected wallet, then send the caller to `url` with a 303.
pub async fn redirect_to_next(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RedirectRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body?;

    // The URL itself is not validated, but it has to fit in a header.
    let location = HeaderValue::from_str(&request.url).map_err(|_| {
        AppError::BadRequest(format!(
            "redirect url is not a valid header value: {:?}",
            request.url
        ))
    })?;

    state.store.clear().await?;
    tracing::info!(url = %request.url, "Wallet disconnected, redirecting");

    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}
