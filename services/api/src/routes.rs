use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use uptick_admissions::cors::{cors_layer, enforce_origin, OriginGate};
use uptick_admissions::workflows::applicants::{
    applicant_router, ApplicantIntakeService, ApplicantNotifier, ApplicantRepository,
};
use uptick_admissions::workflows::apply::tracks::catalogue;
use uptick_admissions::workflows::apply::{resolve_raw, TrackToolSet};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TrackView {
    pub(crate) code: &'static str,
    pub(crate) name: &'static str,
    #[serde(flatten)]
    pub(crate) tools: TrackToolSet,
}

impl From<TrackToolSet> for TrackView {
    fn from(tools: TrackToolSet) -> Self {
        Self {
            code: tools.track.code(),
            name: tools.track.display_name(),
            tools,
        }
    }
}

/// Full HTTP surface: applicant routes, track catalogue, probes, origin gating.
pub(crate) fn build_router<R, N>(
    service: Arc<ApplicantIntakeService<R, N>>,
    state: AppState,
    gate: OriginGate,
) -> Router
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    applicant_router(service)
        .route("/api/v1/tracks", get(tracks_endpoint))
        .route("/api/v1/tracks/:track", get(track_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found)
        .layer(Extension(state))
        .layer(cors_layer(gate.clone()))
        .layer(from_fn_with_state(gate, enforce_origin))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn tracks_endpoint() -> Json<Vec<TrackView>> {
    Json(catalogue().iter().copied().map(TrackView::from).collect())
}

pub(crate) async fn track_endpoint(Path(track): Path<String>) -> impl IntoResponse {
    match resolve_raw(&track) {
        Ok(tools) if tools.track.is_set() => {
            (StatusCode::OK, Json(json!(TrackView::from(tools)))).into_response()
        }
        _ => not_found().await.into_response(),
    }
}

pub(crate) async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
