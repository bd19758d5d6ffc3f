use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::applicants::repository::ApplicantRepository;
use crate::workflows::applicants::router::applicant_router;
use crate::workflows::applicants::service::ApplicantIntakeService;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_creates_applicant() {
    let (service, _, notifier) = build_service();
    let router = applicant_router(Arc::new(service));

    let body = serde_json::to_value(payload()).expect("payload json");
    let response = router
        .oneshot(json_request("POST", "/api/v1/applicants", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(true));
    assert_eq!(payload["data"]["notificationSent"], json!(true));
    assert_eq!(payload["data"]["applicant"]["status"], json!("pending"));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn submit_route_reports_field_errors() {
    let (service, _, _) = build_service();
    let router = applicant_router(Arc::new(service));

    let mut body = serde_json::to_value(payload()).expect("payload json");
    body["referralSource"] = json!("OTHER");
    let response = router
        .oneshot(json_request("POST", "/api/v1/applicants", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert!(payload["errors"]["referralSourceOther"].is_string());
}

#[tokio::test]
async fn submit_route_hides_storage_failures() {
    let service = ApplicantIntakeService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifier::default()),
    );
    let router = applicant_router(Arc::new(service));

    let body = serde_json::to_value(payload()).expect("payload json");
    let response = router
        .oneshot(json_request("POST", "/api/v1/applicants", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(!payload["message"]
        .as_str()
        .unwrap_or_default()
        .contains("database"));
}

#[tokio::test]
async fn list_route_returns_page_envelope() {
    let (service, _, _) = build_service();
    service.submit(payload()).await.expect("seeded");
    let router = applicant_router(Arc::new(service));

    let response = router
        .oneshot(get("/api/v1/applicants?page=1&pageSize=5&status=pending"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total"], json!(1));
    assert_eq!(payload["page"], json!(1));
    assert_eq!(payload["pageSize"], json!(5));
    let applicant = &payload["applicants"][0];
    assert_eq!(applicant["name"], json!("Jane Doe"));
    assert_eq!(applicant["phone"], json!("+1234567890"));
    assert!(applicant["appliedDate"].is_string());
    assert!(applicant.get("profileImage").is_none());
}

#[tokio::test]
async fn detail_and_status_routes() {
    let (service, _, _) = build_service();
    let receipt = service.submit(payload()).await.expect("seeded");
    let router = applicant_router(Arc::new(service));
    let id = receipt.applicant.id.0;

    let response = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/applicants/{id}/status"),
            json!({ "status": "waitlisted" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .clone()
        .oneshot(get(&format!("/api/v1/applicants/{id}")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], json!("waitlisted"));
    assert_eq!(payload["submission"]["track"], json!("BACKEND"));

    let response = router
        .oneshot(get("/api/v1/applicants/app-999999"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
}

#[tokio::test]
async fn delete_route_removes_applicant() {
    let (service, repository, _) = build_service();
    let receipt = service.submit(payload()).await.expect("seeded");
    let router = applicant_router(Arc::new(service));

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/v1/applicants/{}", receipt.applicant.id.0))
        .body(Body::empty())
        .expect("request builds");
    let response = router.oneshot(request).await.expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(repository.all().expect("reachable").is_empty());
}

#[tokio::test]
async fn export_route_serves_csv() {
    let (service, _, _) = build_service();
    service.submit(payload()).await.expect("seeded");
    let router = applicant_router(Arc::new(service));

    let response = router
        .oneshot(get("/api/v1/applicants/export"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("text/csv; charset=utf-8")
    );
    let body = read_text_body(response).await;
    assert!(body.starts_with("id,name,email"));
    assert!(body.contains("Jane Doe"));
}

#[tokio::test]
async fn submit_route_reports_missing_fields_in_envelope() {
    let (service, repository, _) = build_service();
    let router = applicant_router(Arc::new(service));

    let mut body = serde_json::to_value(payload()).expect("payload json");
    body.as_object_mut()
        .expect("payload is an object")
        .remove("firstName");
    let response = router
        .oneshot(json_request("POST", "/api/v1/applicants", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert!(payload["errors"]["firstName"].is_string());
    assert!(repository.all().expect("reachable").is_empty());
}

#[tokio::test]
async fn submit_route_reports_unknown_track_as_field_error() {
    let (service, _, notifier) = build_service();
    let router = applicant_router(Arc::new(service));

    let mut body = serde_json::to_value(payload()).expect("payload json");
    body["track"] = json!("DESIGN");
    let response = router
        .oneshot(json_request("POST", "/api/v1/applicants", body))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert!(payload["errors"]["track"].is_string());
    assert!(!payload.to_string().contains("unknown variant"));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn submit_route_wraps_unparseable_bodies() {
    let (service, _, _) = build_service();
    let router = applicant_router(Arc::new(service));

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/applicants")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstName\": "))
        .expect("request builds");
    let response = router.oneshot(request).await.expect("route executes");

    assert!(response.status().is_client_error());
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
    let payload = read_json_body(response).await;
    assert_eq!(payload["success"], json!(false));
    assert!(payload["message"].is_string());
}
