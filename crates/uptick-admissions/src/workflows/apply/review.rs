use serde::Serialize;

use super::domain::{requires_referral_detail, ApplicationRecord, ReferralSource};

const EMPTY_VALUE: &str = "N/A";

/// One labelled line on the review page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryItem {
    pub label: &'static str,
    pub value: String,
}

/// Read-only summary shown before the applicant confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationReview {
    pub personal: Vec<SummaryItem>,
    pub track: Vec<SummaryItem>,
    pub referral: Vec<SummaryItem>,
}

fn item(label: &'static str, value: impl Into<String>) -> SummaryItem {
    let value = value.into();
    let value = if value.trim().is_empty() {
        EMPTY_VALUE.to_string()
    } else {
        value
    };
    SummaryItem { label, value }
}

impl ApplicationReview {
    pub fn from_record(record: &ApplicationRecord) -> Self {
        let personal = vec![
            item("Full Name", record.full_name()),
            item("Email", record.email.trim()),
            item("Phone", record.phone_number.trim()),
            item("City", record.city.trim()),
        ];

        let mut track = vec![item("Selected Track", record.track.display_name())];
        let tools = record
            .selected_tools()
            .map(|selection| selection.entries().join(", "))
            .unwrap_or_default();
        if !tools.is_empty() {
            track.push(item("Tools", tools));
        }

        let referral_label = ReferralSource::from_code(&record.referral_source)
            .map(|source| source.display_name().to_string())
            .unwrap_or_else(|| record.referral_source.trim().to_string());
        let mut referral = vec![item("Referral Source", referral_label)];
        if requires_referral_detail(&record.referral_source) {
            referral.push(item("Other Source", record.referral_source_other.trim()));
        }

        Self {
            personal,
            track,
            referral,
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &SummaryItem> {
        self.personal
            .iter()
            .chain(self.track.iter())
            .chain(self.referral.iter())
    }

    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.items()
            .find(|item| item.label == label)
            .map(|item| item.value.as_str())
    }
}
