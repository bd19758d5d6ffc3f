use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use uptick_admissions::workflows::applicants::domain::{ApplicantId, ApplicantRecord};
use uptick_admissions::workflows::applicants::notifier::{
    render_confirmation_html, CONFIRMATION_SUBJECT,
};
use uptick_admissions::workflows::applicants::{
    ApplicantNotifier, ApplicantRepository, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local applicant store; contents are lost on restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicantRepository {
    records: Arc<Mutex<HashMap<ApplicantId, ApplicantRecord>>>,
}

impl InMemoryApplicantRepository {
    fn guard(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<ApplicantId, ApplicantRecord>>, RepositoryError>
    {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("applicant store poisoned".to_string()))
    }
}

impl ApplicantRepository for InMemoryApplicantRepository {
    fn insert(&self, record: ApplicantRecord) -> Result<ApplicantRecord, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicantRecord) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicantRecord>, RepositoryError> {
        Ok(self.guard()?.get(id).cloned())
    }

    fn remove(&self, id: &ApplicantId) -> Result<ApplicantRecord, RepositoryError> {
        self.guard()?.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<ApplicantRecord>, RepositoryError> {
        Ok(self.guard()?.values().cloned().collect())
    }
}

/// Prints the confirmation email instead of sending it.
pub(crate) struct ConsoleNotifier;

#[async_trait]
impl ApplicantNotifier for ConsoleNotifier {
    async fn send(&self, to: &str, recipient_name: &str) -> bool {
        let html = render_confirmation_html(recipient_name);
        println!(
            "\nEmail to {to}: {CONFIRMATION_SUBJECT} ({} bytes of html)",
            html.len()
        );
        true
    }
}
