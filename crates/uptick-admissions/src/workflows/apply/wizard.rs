use tracing::debug;

use super::domain::{ApplicationRecord, ApplicationStep, StepDescriptor, APPLICATION_STEPS};
use super::navigator::StepNavigator;
use super::submission::{assemble, AssemblyError, SubmissionPayload};
use super::validation::{validate, validate_all, StepValidation};

/// Errors raised when the wizard is asked to submit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("submission is only available from the final step (currently on step {current})")]
    NotOnFinalStep { current: usize },
    #[error("application has {} invalid field(s)", .0.errors.len())]
    Validation(StepValidation),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}

/// One applicant's wizard session: the form record plus the page cursor.
#[derive(Debug, Clone)]
pub struct ApplicationWizard {
    record: ApplicationRecord,
    navigator: StepNavigator,
    steps: &'static [StepDescriptor],
}

impl Default for ApplicationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationWizard {
    pub fn new() -> Self {
        Self::with_steps(&APPLICATION_STEPS)
    }

    pub fn with_steps(steps: &'static [StepDescriptor]) -> Self {
        Self {
            record: ApplicationRecord::default(),
            navigator: StepNavigator::new(steps.len()),
            steps,
        }
    }

    pub fn record(&self) -> &ApplicationRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ApplicationRecord {
        &mut self.record
    }

    pub fn current_step(&self) -> usize {
        self.navigator.current_step()
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn descriptor(&self) -> Option<StepDescriptor> {
        self.steps.get(self.navigator.current_step() - 1).copied()
    }

    /// Check the current page and move forward when it has no hard errors.
    pub fn advance(&mut self) -> Result<StepValidation, StepValidation> {
        let outcome = match ApplicationStep::from_index(self.navigator.current_step()) {
            Some(step) => validate(step, &self.record),
            None => StepValidation::default(),
        };

        if !outcome.is_valid() {
            debug!(
                step = self.navigator.current_step(),
                errors = outcome.errors.len(),
                "wizard step blocked"
            );
            return Err(outcome);
        }

        self.navigator.next();
        Ok(outcome)
    }

    pub fn back(&mut self) {
        self.navigator.prev();
    }

    /// Consume the record into a payload and start over with an empty form.
    pub fn submit(&mut self) -> Result<SubmissionPayload, WizardError> {
        if !self.navigator.is_last_step() {
            return Err(WizardError::NotOnFinalStep {
                current: self.navigator.current_step(),
            });
        }

        let outcome = validate_all(&self.record);
        if !outcome.is_valid() {
            return Err(WizardError::Validation(outcome));
        }

        let payload = assemble(&self.record)?;
        self.record.clear();
        self.navigator.reset();
        Ok(payload)
    }
}
