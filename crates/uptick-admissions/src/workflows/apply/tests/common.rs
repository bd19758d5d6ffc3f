use crate::workflows::apply::domain::{ApplicationRecord, Track};

/// A record that passes every step with the backend track selected.
pub(super) fn backend_record() -> ApplicationRecord {
    ApplicationRecord {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@x.com".to_string(),
        phone_number: "+1234567890".to_string(),
        city: "NYC".to_string(),
        track: Track::Backend,
        backend_tools: vec!["Node.js".to_string()],
        backend_tools_other: String::new(),
        referral_source: "TWITTER".to_string(),
        confirm: true,
        ..ApplicationRecord::default()
    }
}

/// Backend record polluted with stale answers from every other track.
pub(super) fn record_with_stale_tools(track: Track) -> ApplicationRecord {
    let mut record = backend_record();
    record.track = track;
    record.frontend_tools = vec!["React".to_string(), "Svelte".to_string()];
    record.frontend_tools_other = "Qwik".to_string();
    record.backend_tools = vec!["Go".to_string()];
    record.backend_tools_other = "Elixir".to_string();
    record.fullstack_tools = vec!["Django".to_string()];
    record.fullstack_tools_other = "Remix".to_string();
    record.mobile_tools = vec!["Flutter".to_string()];
    record.mobile_tools_other = "Ionic".to_string();
    record
}

pub(super) fn personal_only_record() -> ApplicationRecord {
    ApplicationRecord {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        phone_number: "+1 234 567 890".to_string(),
        city: "New York".to_string(),
        ..ApplicationRecord::default()
    }
}
