use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::apply::SubmissionPayload;

/// Identifier wrapper for stored applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Review state shown in the applicant-management table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicantStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Waitlisted,
}

impl ApplicantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantStatus::Pending => "pending",
            ApplicantStatus::Approved => "approved",
            ApplicantStatus::Rejected => "rejected",
            ApplicantStatus::Waitlisted => "waitlisted",
        }
    }
}

/// Stored applicant: the listing columns plus the payload that created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRecord {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: ApplicantStatus,
    pub applied_date: NaiveDate,
    pub course: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub submission: SubmissionPayload,
}

impl ApplicantRecord {
    pub fn from_submission(
        id: ApplicantId,
        submission: SubmissionPayload,
        applied_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: submission.full_name(),
            email: submission.email.trim().to_string(),
            phone: submission.phone_number.trim().to_string(),
            status: ApplicantStatus::Pending,
            applied_date,
            course: submission.track.display_name().to_string(),
            profile_image: None,
            submission,
        }
    }

    pub fn summary(&self) -> ApplicantSummary {
        ApplicantSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            status: self.status,
            applied_date: self.applied_date,
            course: self.course.clone(),
            profile_image: self.profile_image.clone(),
        }
    }

    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.name, &self.email, &self.course]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Row shape the applicant-management table consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantSummary {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub status: ApplicantStatus,
    pub applied_date: NaiveDate,
    pub course: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Listing filters accepted by the management endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicantQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub status: Option<ApplicantStatus>,
    pub search: Option<String>,
}

impl ApplicantQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub(crate) fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

/// One page of applicants plus the unpaged total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantPage {
    pub applicants: Vec<ApplicantSummary>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}
