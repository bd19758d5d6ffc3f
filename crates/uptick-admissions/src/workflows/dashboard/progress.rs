use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("course must span at least one week")]
    ZeroTotalWeeks,
}

/// Weeks completed out of a course's length. The length is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawProgress")]
pub struct CourseProgress {
    completed_weeks: u32,
    total_weeks: NonZeroU32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProgress {
    completed_weeks: u32,
    total_weeks: u32,
}

impl TryFrom<RawProgress> for CourseProgress {
    type Error = ProgressError;

    fn try_from(raw: RawProgress) -> Result<Self, Self::Error> {
        Self::new(raw.completed_weeks, raw.total_weeks)
    }
}

impl CourseProgress {
    /// Completed weeks beyond the course length are clamped to it.
    pub fn new(completed_weeks: u32, total_weeks: u32) -> Result<Self, ProgressError> {
        let total_weeks = NonZeroU32::new(total_weeks).ok_or(ProgressError::ZeroTotalWeeks)?;
        Ok(Self {
            completed_weeks: completed_weeks.min(total_weeks.get()),
            total_weeks,
        })
    }

    pub fn completed_weeks(&self) -> u32 {
        self.completed_weeks
    }

    pub fn total_weeks(&self) -> u32 {
        self.total_weeks.get()
    }

    /// Whole percent complete, rounded down.
    pub fn percentage(&self) -> u8 {
        let percent = u64::from(self.completed_weeks) * 100 / u64::from(self.total_weeks.get());
        percent as u8
    }

    pub fn current_week(&self) -> u32 {
        self.completed_weeks
            .saturating_add(1)
            .min(self.total_weeks.get())
    }
}
