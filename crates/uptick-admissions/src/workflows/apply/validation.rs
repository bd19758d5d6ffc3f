use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::{requires_referral_detail, ApplicationRecord, ApplicationStep, Track};
use super::tracks;

/// Field key to human readable message.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Outcome of checking one step (or the whole form) against its rules.
///
/// `errors` block forward navigation; `warnings` are surfaced inline but do
/// not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StepValidation {
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: FieldErrors,
}

impl StepValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn warning(&self, field: &str) -> Option<&str> {
        self.warnings.get(field).map(String::as_str)
    }

    fn merge(&mut self, other: StepValidation) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .expect("email pattern compiles")
    })
}

pub fn is_valid_email(raw: &str) -> bool {
    email_pattern().is_match(raw.trim())
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

/// Identity rules shared by the wizard and the intake endpoint.
pub(crate) fn check_identity(
    errors: &mut FieldErrors,
    first_name: &str,
    last_name: &str,
    email: &str,
    phone_number: &str,
    city: &str,
) {
    require(errors, "firstName", first_name, "First name is required");
    require(errors, "lastName", last_name, "Last name is required");
    if email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !is_valid_email(email) {
        errors.insert("email", "Enter a valid email address".to_string());
    }
    require(errors, "phoneNumber", phone_number, "Phone number is required");
    require(errors, "city", city, "City is required");
}

pub(crate) fn check_track(errors: &mut FieldErrors, track: Track) {
    if !track.is_set() {
        errors.insert("track", "Please select a track".to_string());
    }
}

pub(crate) fn check_referral(
    errors: &mut FieldErrors,
    referral_source: &str,
    referral_source_other: &str,
) {
    require(
        errors,
        "referralSource",
        referral_source,
        "Please tell us how you heard about us",
    );
    if requires_referral_detail(referral_source) {
        require(
            errors,
            "referralSourceOther",
            referral_source_other,
            "Please specify how you heard about us",
        );
    }
}

/// Evaluate a single step. Pure: the record is only read.
pub fn validate(step: ApplicationStep, record: &ApplicationRecord) -> StepValidation {
    let mut outcome = StepValidation::default();

    match step {
        ApplicationStep::PersonalInfo => check_identity(
            &mut outcome.errors,
            &record.first_name,
            &record.last_name,
            &record.email,
            &record.phone_number,
            &record.city,
        ),
        ApplicationStep::Track => check_track(&mut outcome.errors, record.track),
        ApplicationStep::Tools => match record.selected_tools() {
            None => check_track(&mut outcome.errors, record.track),
            Some(selection) if selection.is_empty() => {
                let key = tracks::resolve(record.track)
                    .field_key
                    .unwrap_or("tools");
                outcome.warnings.insert(
                    key,
                    "Select at least one tool or describe what you use".to_string(),
                );
            }
            Some(_) => {}
        },
        ApplicationStep::Referral => check_referral(
            &mut outcome.errors,
            &record.referral_source,
            &record.referral_source_other,
        ),
        ApplicationStep::Review => {
            if !record.confirm {
                outcome.errors.insert(
                    "confirm",
                    "You must confirm your information is correct".to_string(),
                );
            }
        }
    }

    outcome
}

/// Merged validation over every step, used before final submission.
pub fn validate_all(record: &ApplicationRecord) -> StepValidation {
    ApplicationStep::ALL
        .into_iter()
        .fold(StepValidation::default(), |mut acc, step| {
            acc.merge(validate(step, record));
            acc
        })
}
