//! wallet-web: HTTP API over a single persisted wallet connection.
//!
//! Routes live under `/api/`:
//!
//! | Method | Path | Effect |
//! |---|---|---|
//! | GET | `/api/` | liveness message |
//! | POST | `/api/connect-wallet` | store `{address}` as connected |
//! | GET | `/api/wallet-status` | `{wallet_address, connected}` |
//! | POST | `/api/disconnect-wallet` | clear the record |
//! | POST | `/api/redirect-to-next` | clear the record, 303 to `{url}` |

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use state::AppState;

/// Build the application router around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = state.config.cors.layer();

    Router::new()
        .route("/api/", get(routes::root))
        .route("/api/connect-wallet", post(routes::wallet::connect_wallet))
        .route("/api/wallet-status", get(routes::wallet::wallet_status))
        .route(
            "/api/disconnect-wallet",
            post(routes::wallet::disconnect_wallet),
        )
        .route(
            "/api/redirect-to-next",
            post(routes::wallet::redirect_to_next),
        )
        // State
        .with_state(state)
        // Middleware
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
