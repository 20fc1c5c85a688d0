//! Per-day place-name romanization for non-Latin-script destinations.

use tracing::warn;

use crate::domain::DayContent;
use crate::kernel::PipelineDeps;

/// Destinations whose local place names commonly use a non-Latin script.
const NON_LATIN_DESTINATIONS: [&str; 5] = ["japan", "china", "korea", "thailand", "vietnam"];

/// Whether day locations for this destination should be romanized.
pub fn needs_translation(destination: &str) -> bool {
    let lower = destination.to_lowercase();
    NON_LATIN_DESTINATIONS.iter().any(|d| lower.contains(d))
}

/// Fill `translated_name` on each located day. A failed translation keeps
/// the original name so rendering never shows a hole.
pub async fn apply(deps: &PipelineDeps, days: &mut [DayContent]) {
    for day in days.iter_mut() {
        let Some(location) = day.location.clone() else {
            continue;
        };
        let translated = match deps.translator.translate(&location, Some("latin")).await {
            Ok(name) => name,
            Err(e) => {
                warn!(location = %location, error = %e, "Translation failed; keeping original name");
                location.clone()
            }
        };
        day.translated_name = Some(translated);
    }
}
