use serde::Serialize;

use super::domain::{InvalidTrack, Track};

/// Tool question-set and form keys that belong to one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackToolSet {
    pub track: Track,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_key: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_field_key: Option<&'static str>,
    pub options: &'static [&'static str],
}

impl TrackToolSet {
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn offers(&self, option: &str) -> bool {
        self.options.contains(&option)
    }
}

const UNSET_TOOLS: TrackToolSet = TrackToolSet {
    track: Track::Unset,
    field_key: None,
    other_field_key: None,
    options: &[],
};

const TRACK_TOOLS: [TrackToolSet; 4] = [
    TrackToolSet {
        track: Track::Frontend,
        field_key: Some("frontendTools"),
        other_field_key: Some("frontendToolsOther"),
        options: &["React", "Vue", "Angular", "Svelte", "Next.js", "Tailwind CSS"],
    },
    TrackToolSet {
        track: Track::Backend,
        field_key: Some("backendTools"),
        other_field_key: Some("backendToolsOther"),
        options: &[
            "Node.js",
            "Python (Django/Flask)",
            "PHP (Laravel)",
            "Java (Spring)",
            "Ruby on Rails",
            "Go",
        ],
    },
    TrackToolSet {
        track: Track::FullstackDevelopment,
        field_key: Some("fullstackTools"),
        other_field_key: Some("fullstackToolsOther"),
        options: &[
            "React",
            "Node.js",
            "Next.js",
            "Laravel",
            "Django",
            "MongoDB",
            "PostgreSQL",
        ],
    },
    TrackToolSet {
        track: Track::MobileDevelopment,
        field_key: Some("mobileTools"),
        other_field_key: Some("mobileToolsOther"),
        options: &["React Native", "Flutter", "Swift (iOS)", "Kotlin (Android)"],
    },
];

/// Look up the tool question-set for a track. `Unset` yields an empty set.
pub fn resolve(track: Track) -> TrackToolSet {
    TRACK_TOOLS
        .iter()
        .find(|set| set.track == track)
        .copied()
        .unwrap_or(UNSET_TOOLS)
}

/// Resolve from the raw form value, rejecting anything outside the vocabulary.
pub fn resolve_raw(raw: &str) -> Result<TrackToolSet, InvalidTrack> {
    let track: Track = raw.parse()?;
    Ok(resolve(track))
}

/// The full catalogue for every selectable track.
pub fn catalogue() -> &'static [TrackToolSet] {
    &TRACK_TOOLS
}
