//! Service health endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthReport {
    fn new(store_reachable: bool) -> (StatusCode, Self) {
        let (code, status) = if store_reachable {
            (StatusCode::OK, "ok")
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        };

        (
            code,
            Self {
                status,
                version: env!("CARGO_PKG_VERSION"),
            },
        )
    }
}

/// Readiness: the upgrade flow is down whenever the membership store is.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let reachable = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    let (code, report) = HealthReport::new(reachable);
    (code, Json(report))
}

/// Liveness: no store access, only proves the process is serving.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
