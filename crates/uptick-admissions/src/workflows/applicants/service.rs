use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{
    ApplicantId, ApplicantPage, ApplicantQuery, ApplicantRecord, ApplicantStatus,
    ApplicantSummary,
};
use super::export::{write_applicants_csv, ExportError};
use super::notifier::ApplicantNotifier;
use super::repository::{ApplicantRepository, RepositoryError};
use crate::workflows::apply::validation::{check_identity, check_referral, check_track};
use crate::workflows::apply::{FieldErrors, SubmissionPayload};

/// Acknowledgement returned to the submitting client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub applicant: ApplicantSummary,
    pub notification_sent: bool,
}

/// Service composing payload validation, storage, and the confirmation email.
pub struct ApplicantIntakeService<R, N> {
    repository: Arc<R>,
    notifier: Arc<N>,
    sequence: AtomicU64,
}

impl<R, N> ApplicantIntakeService<R, N>
where
    R: ApplicantRepository + 'static,
    N: ApplicantNotifier + 'static,
{
    pub fn new(repository: Arc<R>, notifier: Arc<N>) -> Self {
        Self {
            repository,
            notifier,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_applicant_id(&self) -> ApplicantId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ApplicantId(format!("app-{id:06}"))
    }

    /// Validate, store, and acknowledge a submission dated today.
    pub async fn submit(&self, payload: SubmissionPayload) -> Result<IntakeReceipt, IntakeError> {
        self.submit_on(payload, Utc::now().date_naive()).await
    }

    pub async fn submit_on(
        &self,
        payload: SubmissionPayload,
        applied_date: NaiveDate,
    ) -> Result<IntakeReceipt, IntakeError> {
        let errors = validate_payload(&payload);
        if !errors.is_empty() {
            return Err(IntakeError::Validation(errors));
        }

        let record =
            ApplicantRecord::from_submission(self.next_applicant_id(), payload, applied_date);
        let stored = self.repository.insert(record)?;
        info!(
            applicant_id = %stored.id,
            track = %stored.submission.track,
            "application received"
        );

        let notification_sent = self
            .notifier
            .send(&stored.email, stored.submission.first_name.trim())
            .await;
        if !notification_sent {
            warn!(applicant_id = %stored.id, "confirmation email not delivered");
        }

        Ok(IntakeReceipt {
            applicant: stored.summary(),
            notification_sent,
        })
    }

    /// Filtered, newest-first page for the management table.
    pub fn list(&self, query: &ApplicantQuery) -> Result<ApplicantPage, IntakeError> {
        let records = self.matching(query)?;
        let page = query.page();
        let page_size = query.page_size();
        let total = records.len();
        let applicants = records
            .iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .map(ApplicantRecord::summary)
            .collect();

        Ok(ApplicantPage {
            applicants,
            total,
            page,
            page_size,
        })
    }

    fn matching(&self, query: &ApplicantQuery) -> Result<Vec<ApplicantRecord>, IntakeError> {
        let mut records: Vec<ApplicantRecord> = self
            .repository
            .all()?
            .into_iter()
            .filter(|record| query.status.map_or(true, |status| record.status == status))
            .filter(|record| {
                query
                    .search_term()
                    .map_or(true, |term| record.matches_search(term))
            })
            .collect();
        records.sort_by(|a, b| {
            b.applied_date
                .cmp(&a.applied_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    pub fn get(&self, id: &ApplicantId) -> Result<ApplicantRecord, IntakeError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    pub fn update_status(
        &self,
        id: &ApplicantId,
        status: ApplicantStatus,
    ) -> Result<ApplicantRecord, IntakeError> {
        let mut record = self.get(id)?;
        let previous = record.status;
        record.status = status;
        self.repository.update(record.clone())?;
        info!(
            applicant_id = %id,
            from = previous.label(),
            to = status.label(),
            "applicant status updated"
        );
        Ok(record)
    }

    pub fn remove(&self, id: &ApplicantId) -> Result<ApplicantRecord, IntakeError> {
        let removed = self.repository.remove(id)?;
        info!(applicant_id = %id, "applicant removed");
        Ok(removed)
    }

    /// Every stored applicant matching the query filters (ignoring paging), as CSV.
    pub fn export_csv(&self, query: &ApplicantQuery) -> Result<String, IntakeError> {
        let rows: Vec<ApplicantSummary> = self
            .matching(query)?
            .iter()
            .map(ApplicantRecord::summary)
            .collect();
        Ok(write_applicants_csv(&rows)?)
    }
}

/// Backend re-check of the wizard rules; the payload may not come from the wizard.
pub fn validate_payload(payload: &SubmissionPayload) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_identity(
        &mut errors,
        &payload.first_name,
        &payload.last_name,
        &payload.email,
        &payload.phone_number,
        &payload.city,
    );
    check_track(&mut errors, payload.track);
    check_referral(
        &mut errors,
        &payload.referral_source,
        payload.referral_source_other.as_deref().unwrap_or_default(),
    );
    errors
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("submission has {} invalid field(s)", .0.len())]
    Validation(FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
