//! Multi-step application wizard: form state, per-step validation, page
//! navigation, track tool resolution, and submission assembly.

pub mod domain;
pub mod navigator;
pub mod review;
pub mod submission;
pub mod tracks;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationRecord, ApplicationStep, InvalidTrack, ReferralSource, StepDescriptor,
    ToolSelection, Track, APPLICATION_STEPS,
};
pub use navigator::StepNavigator;
pub use review::{ApplicationReview, SummaryItem};
pub use submission::{assemble, AssemblyError, SubmissionPayload};
pub use tracks::{resolve, resolve_raw, TrackToolSet};
pub use validation::{is_valid_email, validate, validate_all, FieldErrors, StepValidation};
pub use wizard::{ApplicationWizard, WizardError};
