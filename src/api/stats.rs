//! Statistics endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, services::stats::Stats};

#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub stats: Stats,
}

/// Occupancy and revenue statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Current statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(StatsResponse {
        success: true,
        stats,
    }))
}
