use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use super::domain::{ApplicantId, ApplicantQuery, ApplicantStatus};
use super::notifier::ApplicantNotifier;
use super::repository::{ApplicantRepository, RepositoryError};
use super::service::{ApplicantIntakeService, IntakeError};
use crate::workflows::apply::{FieldErrors, SubmissionPayload, Track};

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: ApplicantStatus,
}

/// Router builder exposing intake and applicant-management endpoints.
pub fn applicant_router<R, N>(service: Arc<ApplicantIntakeService<R, N>>) -> Router
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    Router::new()
        .route(
            "/api/v1/applicants",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route("/api/v1/applicants/export", get(export_handler::<R, N>))
        .route(
            "/api/v1/applicants/:applicant_id",
            get(detail_handler::<R, N>).delete(remove_handler::<R, N>),
        )
        .route(
            "/api/v1/applicants/:applicant_id/status",
            patch(status_handler::<R, N>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<ApplicantIntakeService<R, N>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "submission body rejected");
            let body = json!({
                "success": false,
                "message": "Request body must be a JSON application",
            });
            return (rejection.status(), Json(body)).into_response();
        }
    };

    let payload = match decode_submission(body) {
        Ok(payload) => payload,
        Err(errors) => return error_response(IntakeError::Validation(errors)),
    };

    match service.submit(payload).await {
        Ok(receipt) => {
            let body = json!({
                "success": true,
                "message": "Application received",
                "data": receipt,
            });
            (StatusCode::CREATED, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<ApplicantIntakeService<R, N>>>,
    Query(query): Query<ApplicantQuery>,
) -> Response
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    match service.list(&query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn detail_handler<R, N>(
    State(service): State<Arc<ApplicantIntakeService<R, N>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    match service.get(&ApplicantId(applicant_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<ApplicantIntakeService<R, N>>>,
    Path(applicant_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Response
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    match service.update_status(&ApplicantId(applicant_id), update.status) {
        Ok(record) => (StatusCode::OK, Json(record.summary())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_handler<R, N>(
    State(service): State<Arc<ApplicantIntakeService<R, N>>>,
    Path(applicant_id): Path<String>,
) -> Response
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    match service.remove(&ApplicantId(applicant_id)) {
        Ok(record) => {
            let body = json!({
                "success": true,
                "message": "Applicant removed",
                "data": record.summary(),
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<ApplicantIntakeService<R, N>>>,
    Query(query): Query<ApplicantQuery>,
) -> Response
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    match service.export_csv(&query) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"applicants.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// Decode a submission body, reporting an unknown track as a field error.
fn decode_submission(body: Value) -> Result<SubmissionPayload, FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(raw) = body.get("track").and_then(Value::as_str) {
        if raw.parse::<Track>().is_err() {
            errors.insert("track", "Please select a valid track".to_string());
            return Err(errors);
        }
    }

    serde_json::from_value(body).map_err(|err| {
        debug!(error = %err, "submission body malformed");
        errors.insert("body", "Application data is malformed".to_string());
        errors
    })
}

/// JSON error envelope for intake failures.
pub(crate) fn error_response(err: IntakeError) -> Response {
    match err {
        IntakeError::Validation(errors) => {
            let body = json!({
                "success": false,
                "message": "Validation failed",
                "errors": errors,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        IntakeError::Repository(RepositoryError::NotFound) => {
            let body = json!({
                "success": false,
                "message": "Applicant not found",
            });
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        IntakeError::Repository(RepositoryError::Conflict) => {
            let body = json!({
                "success": false,
                "message": "Applicant already exists",
            });
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
        other => {
            error!(error = %other, "applicant request failed");
            let body = json!({
                "success": false,
                "message": "Something went wrong. Please try again.",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
