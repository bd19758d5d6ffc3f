use serde::{Deserialize, Serialize};

use super::domain::{requires_referral_detail, ApplicationRecord, Track};

/// Normalized body posted to the applicant submission endpoint.
///
/// Absent fields decode as empty so field validation can report them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub city: String,
    pub track: Track,
    pub tools: Vec<String>,
    pub referral_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_source_other: Option<String>,
}

impl SubmissionPayload {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// Assembly failures. Reaching one means navigation gating was bypassed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssemblyError {
    #[error("application has not been confirmed")]
    NotConfirmed,
    #[error("application is incomplete: no track selected")]
    IncompleteApplication,
}

/// Flatten the form into the payload, keeping only the selected track's tools.
pub fn assemble(record: &ApplicationRecord) -> Result<SubmissionPayload, AssemblyError> {
    if !record.confirm {
        return Err(AssemblyError::NotConfirmed);
    }

    let selection = record
        .selected_tools()
        .ok_or(AssemblyError::IncompleteApplication)?;

    let referral_source_other = requires_referral_detail(&record.referral_source)
        .then(|| record.referral_source_other.trim().to_string());

    Ok(SubmissionPayload {
        first_name: record.first_name.clone(),
        last_name: record.last_name.clone(),
        email: record.email.clone(),
        phone_number: record.phone_number.clone(),
        city: record.city.clone(),
        track: record.track,
        tools: selection.entries(),
        referral_source: record.referral_source.clone(),
        referral_source_other,
    })
}
