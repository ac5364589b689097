//! Speaker ID to display name mapping.
//!
//! The recording has two known speakers; everything else renders as a
//! fallback label. The table is a process-wide constant.

/// Known speaker IDs and their display names.
const SPEAKER_NAMES: &[(u32, &str)] = &[(0, "Epstein"), (1, "Ehud")];

/// Resolve a speaker ID to a display name.
///
/// Unmapped IDs render as `"Other"`; an absent ID renders as `"Unknown"`.
pub fn speaker_name(speaker: Option<u32>) -> &'static str {
    match speaker {
        None => "Unknown",
        Some(id) => SPEAKER_NAMES
            .iter()
            .find(|(known, _)| *known == id)
            .map(|(_, name)| *name)
            .unwrap_or("Other"),
    }
}
