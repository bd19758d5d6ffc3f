use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Engineering discipline an applicant is applying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Track {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "FRONTEND")]
    Frontend,
    #[serde(rename = "BACKEND")]
    Backend,
    #[serde(rename = "FULLSTACK_DEVELOPMENT")]
    FullstackDevelopment,
    #[serde(rename = "MOBILE_DEVELOPMENT")]
    MobileDevelopment,
}

impl Track {
    /// Every selectable track, in the order the wizard offers them.
    pub const SELECTABLE: [Track; 4] = [
        Track::Frontend,
        Track::Backend,
        Track::FullstackDevelopment,
        Track::MobileDevelopment,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Track::Unset => "",
            Track::Frontend => "FRONTEND",
            Track::Backend => "BACKEND",
            Track::FullstackDevelopment => "FULLSTACK_DEVELOPMENT",
            Track::MobileDevelopment => "MOBILE_DEVELOPMENT",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Track::Unset => "N/A",
            Track::Frontend => "Frontend Engineering",
            Track::Backend => "Backend Engineering",
            Track::FullstackDevelopment => "Fullstack Engineering",
            Track::MobileDevelopment => "Mobile Engineering",
        }
    }

    pub const fn is_set(self) -> bool {
        !matches!(self, Track::Unset)
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Raised when a raw track string is outside the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown track '{0}'")]
pub struct InvalidTrack(pub String);

impl FromStr for Track {
    type Err = InvalidTrack;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "" => Ok(Track::Unset),
            "FRONTEND" => Ok(Track::Frontend),
            "BACKEND" => Ok(Track::Backend),
            "FULLSTACK_DEVELOPMENT" => Ok(Track::FullstackDevelopment),
            "MOBILE_DEVELOPMENT" => Ok(Track::MobileDevelopment),
            other => Err(InvalidTrack(other.to_string())),
        }
    }
}

/// Known referral channels offered on the referral step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferralSource {
    Twitter,
    LinkedIn,
    Instagram,
    Facebook,
    Friend,
    Other,
}

impl ReferralSource {
    pub const ALL: [ReferralSource; 6] = [
        ReferralSource::Twitter,
        ReferralSource::LinkedIn,
        ReferralSource::Instagram,
        ReferralSource::Facebook,
        ReferralSource::Friend,
        ReferralSource::Other,
    ];

    /// Code used when the free-text "other" field is required.
    pub const OTHER_CODE: &'static str = "OTHER";

    pub const fn code(self) -> &'static str {
        match self {
            ReferralSource::Twitter => "TWITTER",
            ReferralSource::LinkedIn => "LINKEDIN",
            ReferralSource::Instagram => "INSTAGRAM",
            ReferralSource::Facebook => "FACEBOOK",
            ReferralSource::Friend => "FRIEND",
            ReferralSource::Other => Self::OTHER_CODE,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            ReferralSource::Twitter => "Twitter (X)",
            ReferralSource::LinkedIn => "LinkedIn",
            ReferralSource::Instagram => "Instagram",
            ReferralSource::Facebook => "Facebook",
            ReferralSource::Friend => "From a Friend",
            ReferralSource::Other => "Other",
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|source| source.code() == raw.trim())
    }
}

/// Whether a raw referral value requires the free-text companion field.
pub fn requires_referral_detail(referral_source: &str) -> bool {
    referral_source.trim() == ReferralSource::OTHER_CODE
}

/// Borrowed view of the tool answers for one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSelection<'a> {
    pub selected: &'a [String],
    pub other: &'a str,
}

impl<'a> ToolSelection<'a> {
    /// Selected options followed by the free-text entry, skipping blanks.
    pub fn entries(&self) -> Vec<String> {
        self.selected
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.other))
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Mutable view used when the wizard records answers for a track.
#[derive(Debug)]
pub struct ToolSelectionMut<'a> {
    pub selected: &'a mut Vec<String>,
    pub other: &'a mut String,
}

/// Canonical state of the multi-step application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationRecord {
    // Step 1
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub city: String,

    // Step 2
    pub track: Track,

    // Step 3
    pub frontend_tools: Vec<String>,
    pub frontend_tools_other: String,
    pub backend_tools: Vec<String>,
    pub backend_tools_other: String,
    pub fullstack_tools: Vec<String>,
    pub fullstack_tools_other: String,
    pub mobile_tools: Vec<String>,
    pub mobile_tools_other: String,

    // Step 4
    pub referral_source: String,
    pub referral_source_other: String,

    // Step 5
    pub confirm: bool,
}

impl ApplicationRecord {
    pub fn tools_for(&self, track: Track) -> Option<ToolSelection<'_>> {
        let (selected, other) = match track {
            Track::Unset => return None,
            Track::Frontend => (&self.frontend_tools, &self.frontend_tools_other),
            Track::Backend => (&self.backend_tools, &self.backend_tools_other),
            Track::FullstackDevelopment => (&self.fullstack_tools, &self.fullstack_tools_other),
            Track::MobileDevelopment => (&self.mobile_tools, &self.mobile_tools_other),
        };
        Some(ToolSelection {
            selected: selected.as_slice(),
            other: other.as_str(),
        })
    }

    pub fn tools_for_mut(&mut self, track: Track) -> Option<ToolSelectionMut<'_>> {
        let (selected, other) = match track {
            Track::Unset => return None,
            Track::Frontend => (&mut self.frontend_tools, &mut self.frontend_tools_other),
            Track::Backend => (&mut self.backend_tools, &mut self.backend_tools_other),
            Track::FullstackDevelopment => {
                (&mut self.fullstack_tools, &mut self.fullstack_tools_other)
            }
            Track::MobileDevelopment => (&mut self.mobile_tools, &mut self.mobile_tools_other),
        };
        Some(ToolSelectionMut { selected, other })
    }

    /// Tool answers for the currently selected track.
    pub fn selected_tools(&self) -> Option<ToolSelection<'_>> {
        self.tools_for(self.track)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Drop every answer, returning the form to its freshly mounted state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Title and helper copy shown above a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepDescriptor {
    pub title: &'static str,
    pub description: &'static str,
}

/// The five pages of the application wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApplicationStep {
    PersonalInfo,
    Track,
    Tools,
    Referral,
    Review,
}

impl ApplicationStep {
    pub const ALL: [ApplicationStep; 5] = [
        ApplicationStep::PersonalInfo,
        ApplicationStep::Track,
        ApplicationStep::Tools,
        ApplicationStep::Referral,
        ApplicationStep::Review,
    ];

    /// Resolve a 1-based step number.
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|offset| Self::ALL.get(offset).copied())
    }

    pub const fn index(self) -> usize {
        match self {
            ApplicationStep::PersonalInfo => 1,
            ApplicationStep::Track => 2,
            ApplicationStep::Tools => 3,
            ApplicationStep::Referral => 4,
            ApplicationStep::Review => 5,
        }
    }

    pub fn descriptor(self) -> StepDescriptor {
        APPLICATION_STEPS[self.index() - 1]
    }
}

pub const APPLICATION_STEPS: [StepDescriptor; 5] = [
    StepDescriptor {
        title: "Personal Information",
        description: "Tell us who you are and how we can reach you.",
    },
    StepDescriptor {
        title: "Track Selection",
        description: "Choose the engineering track you are applying for.",
    },
    StepDescriptor {
        title: "Tools & Technologies",
        description: "Let us know which tools you have worked with.",
    },
    StepDescriptor {
        title: "Referral Source",
        description: "How did you hear about Uptick Talent?",
    },
    StepDescriptor {
        title: "Review & Submit",
        description: "Check your answers and confirm your application.",
    },
];
