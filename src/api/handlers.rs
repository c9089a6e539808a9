//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, EstimateRequest, RoiResponse};
use crate::calc::FormInput;
use crate::location::{LocationRecord, LookupIndex};
use crate::session::{Estimator, Snapshot};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

fn loaded_index(state: &AppState) -> Result<&LookupIndex, ApiError> {
    state.index.as_ref().ok_or_else(|| {
        error(
            StatusCode::SERVICE_UNAVAILABLE,
            "location table unavailable",
        )
    })
}

/// `GET /regions` → 200 + sorted region names
pub async fn get_regions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let index = loaded_index(&state)?;
    Ok(Json(index.regions().to_vec()))
}

/// `GET /regions/{region}/localities` → 200 + sorted locality names,
/// 404 for an unknown region.
pub async fn get_localities(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let index = loaded_index(&state)?;
    if !index.has_region(&region) {
        return Err(error(
            StatusCode::NOT_FOUND,
            format!("unknown region \"{region}\""),
        ));
    }
    Ok(Json(index.localities(&region).to_vec()))
}

/// `GET /locations/{region}/{locality}` → 200 + record, 404 on a miss.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path((region, locality)): Path<(String, String)>,
) -> Result<Json<LocationRecord>, ApiError> {
    let index = loaded_index(&state)?;
    index
        .lookup(&region, &locality)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            error(
                StatusCode::NOT_FOUND,
                format!("no location \"{region}|{locality}\""),
            )
        })
}

/// `POST /estimate` → 200 + `Snapshot`, 422 + issues on invalid input.
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EstimateRequest>,
) -> Result<Json<Snapshot>, ApiError> {
    let index = loaded_index(&state)?;
    let estimator = Estimator::new(index, state.model);
    let input = FormInput::from_raw(&req.form);

    estimator
        .estimate(input, req.prior.as_ref())
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.to_string(),
                    issues: e.issues,
                }),
            )
        })
}

/// `GET /roi` → 200 + summary and series.
pub async fn get_roi(State(state): State<Arc<AppState>>) -> Result<Json<RoiResponse>, ApiError> {
    let series = state
        .roi
        .as_ref()
        .ok_or_else(|| error(StatusCode::SERVICE_UNAVAILABLE, "roi series unavailable"))?;
    Ok(Json(RoiResponse {
        summary: series.summary(),
        series: series.clone(),
    }))
}
