use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::applicants::domain::{ApplicantId, ApplicantRecord};
use crate::workflows::applicants::notifier::ApplicantNotifier;
use crate::workflows::applicants::repository::{ApplicantRepository, RepositoryError};
use crate::workflows::applicants::service::ApplicantIntakeService;
use crate::workflows::apply::{SubmissionPayload, Track};

pub(super) fn applied_on(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).expect("valid date")
}

pub(super) fn payload() -> SubmissionPayload {
    SubmissionPayload {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone_number: "+1234567890".to_string(),
        city: "NYC".to_string(),
        track: Track::Backend,
        tools: vec!["Node.js".to_string()],
        referral_source: "TWITTER".to_string(),
        referral_source_other: None,
    }
}

pub(super) fn payload_for(first_name: &str, email: &str, track: Track) -> SubmissionPayload {
    SubmissionPayload {
        first_name: first_name.to_string(),
        email: email.to_string(),
        track,
        ..payload()
    }
}

pub(super) fn build_service() -> (
    ApplicantIntakeService<MemoryRepository, MemoryNotifier>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifier>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ApplicantIntakeService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    records: Arc<Mutex<BTreeMap<ApplicantId, ApplicantRecord>>>,
}

impl ApplicantRepository for MemoryRepository {
    fn insert(&self, record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicantRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &ApplicantId) -> Result<ApplicantRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Records every dispatch and answers with a fixed outcome.
#[derive(Clone)]
pub(super) struct MemoryNotifier {
    outcome: bool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for MemoryNotifier {
    fn default() -> Self {
        Self::answering(true)
    }
}

impl MemoryNotifier {
    pub(super) fn answering(outcome: bool) -> Self {
        Self {
            outcome,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicantNotifier for MemoryNotifier {
    async fn send(&self, to: &str, recipient_name: &str) -> bool {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push((to.to_string(), recipient_name.to_string()));
        self.outcome
    }
}

pub(super) struct UnavailableRepository;

impl ApplicantRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ApplicantRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &ApplicantId) -> Result<ApplicantRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
