//! Applicant intake backend: payload re-validation, storage, confirmation
//! email, and the applicant-management listing.

pub mod domain;
pub mod export;
pub mod notifier;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicantPage, ApplicantQuery, ApplicantRecord, ApplicantStatus,
    ApplicantSummary,
};
pub use export::ExportError;
pub use notifier::{ApplicantNotifier, NotifierError, ResendNotifier};
pub use repository::{ApplicantRepository, RepositoryError};
pub use router::applicant_router;
pub use service::{validate_payload, ApplicantIntakeService, IntakeError, IntakeReceipt};
