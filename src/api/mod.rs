//! REST API over a loaded location index.
//!
//! Endpoints:
//! - `GET /regions` and `GET /regions/{region}/localities` for the selectors
//! - `GET /locations/{region}/{locality}` for a single record
//! - `POST /estimate` to validate a form and compute its metrics
//! - `GET /roi` for the ten-year ROI summary and series

mod handlers;
pub mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::calc::SizingModel;
use crate::config::SizingConfig;
use crate::location::{LocationTable, LookupIndex};
use crate::roi::RoiSeries;

/// Immutable application state shared across all request handlers.
///
/// A resource that failed to load is `None`; the endpoints depending on it
/// answer 503 while the rest keep working.
pub struct AppState {
    /// Location index, if the table loaded.
    pub index: Option<LookupIndex>,
    /// Calculator constants.
    pub model: SizingModel,
    /// ROI series, if it loaded.
    pub roi: Option<RoiSeries>,
}

impl AppState {
    /// Loads both resources named in `config`, logging failures.
    pub fn load(config: &SizingConfig) -> Self {
        let index = match LocationTable::from_path(&config.data.locations) {
            Ok(table) => {
                let index = LookupIndex::build(table);
                tracing::info!(
                    entries = index.len(),
                    regions = index.regions().len(),
                    "location table loaded"
                );
                Some(index)
            }
            Err(e) => {
                tracing::error!("{e}; location features unavailable");
                None
            }
        };
        let roi = match RoiSeries::from_path(&config.data.roi) {
            Ok(series) => Some(series),
            Err(e) => {
                tracing::error!("{e}; roi view unavailable");
                None
            }
        };
        Self {
            index,
            model: config.model(),
            roi,
        }
    }
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/regions", get(handlers::get_regions))
        .route("/regions/{region}/localities", get(handlers::get_localities))
        .route("/locations/{region}/{locality}", get(handlers::get_location))
        .route("/estimate", post(handlers::post_estimate))
        .route("/roi", get(handlers::get_roi))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Arguments
///
/// * `state` - Shared application state
/// * `addr` - Socket address to bind to
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
