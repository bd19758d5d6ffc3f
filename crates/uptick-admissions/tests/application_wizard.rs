use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use uptick_admissions::workflows::applicants::domain::{ApplicantId, ApplicantRecord};
use uptick_admissions::workflows::applicants::{
    applicant_router, ApplicantIntakeService, ApplicantNotifier, ApplicantRepository,
    RepositoryError,
};
use uptick_admissions::workflows::apply::{
    resolve, ApplicationReview, ApplicationWizard, Track, WizardError,
};

#[derive(Default)]
struct Store {
    records: Mutex<BTreeMap<ApplicantId, ApplicantRecord>>,
}

impl ApplicantRepository for Store {
    fn insert(&self, record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicantRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn remove(&self, id: &ApplicantId) -> Result<ApplicantRecord, RepositoryError> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        Ok(self
            .records
            .lock()
            .expect("store mutex poisoned")
            .values()
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct Outbox {
    sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl ApplicantNotifier for Outbox {
    async fn send(&self, to: &str, recipient_name: &str) -> bool {
        self.sent
            .lock()
            .expect("outbox mutex poisoned")
            .push((to.to_string(), recipient_name.to_string()));
        true
    }
}

fn fill_backend_application(wizard: &mut ApplicationWizard) {
    let record = wizard.record_mut();
    record.first_name = "Jane".to_string();
    record.last_name = "Doe".to_string();
    record.email = "jane@x.com".to_string();
    record.phone_number = "+1234567890".to_string();
    record.city = "NYC".to_string();
}

#[tokio::test]
async fn applicant_walks_the_wizard_and_lands_in_the_backend() {
    let mut wizard = ApplicationWizard::new();

    assert!(
        wizard.advance().is_err(),
        "empty personal details must block step 1"
    );
    assert_eq!(wizard.current_step(), 1);

    fill_backend_application(&mut wizard);
    wizard.advance().expect("personal details accepted");

    wizard.record_mut().track = Track::Backend;
    wizard.advance().expect("track accepted");
    assert_eq!(wizard.current_step(), 3);

    let tools = resolve(Track::Backend);
    assert!(tools.offers("Node.js"));
    wizard.record_mut().backend_tools = vec!["Node.js".to_string()];
    // A stale answer from a previously chosen track must not leak.
    wizard.record_mut().frontend_tools = vec!["React".to_string()];
    let step3 = wizard.advance().expect("tools accepted");
    assert!(step3.warnings.is_empty());

    wizard.record_mut().referral_source = "TWITTER".to_string();
    wizard.advance().expect("referral accepted");
    assert_eq!(wizard.current_step(), 5);

    let review = ApplicationReview::from_record(wizard.record());
    assert_eq!(review.value_of("Full Name"), Some("Jane Doe"));
    assert_eq!(review.value_of("Tools"), Some("Node.js"));

    assert!(matches!(wizard.submit(), Err(WizardError::Validation(_))));
    wizard.record_mut().confirm = true;
    let payload = wizard.submit().expect("confirmed application submits");
    assert_eq!(payload.tools, vec!["Node.js".to_string()]);
    assert_eq!(wizard.current_step(), 1);
    assert!(wizard.record().first_name.is_empty());

    let store = Arc::new(Store::default());
    let outbox = Arc::new(Outbox::default());
    let service = Arc::new(ApplicantIntakeService::new(store.clone(), outbox.clone()));
    let app = applicant_router(service);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/applicants")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&payload).expect("payload serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::CREATED);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["data"]["notificationSent"], Value::Bool(true));
    let applicant_id = body["data"]["applicant"]["id"]
        .as_str()
        .expect("id assigned")
        .to_string();

    let sent = outbox.sent.lock().expect("outbox mutex poisoned").clone();
    assert_eq!(sent, vec![("jane@x.com".to_string(), "Jane".to_string())]);

    let stored = store
        .fetch(&ApplicantId(applicant_id.clone()))
        .expect("store readable")
        .expect("applicant stored");
    assert_eq!(stored.submission.tools, vec!["Node.js".to_string()]);
    assert_eq!(stored.course, Track::Backend.display_name());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/applicants/{applicant_id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
}
