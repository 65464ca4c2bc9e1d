//! Built-in demo history shown until a real recognizer feeds the dashboard.

use crate::domain::{CommandEntry, CommandId, CommandKind, CommandOutcome};

use CommandKind::{Gesture, Voice};
use CommandOutcome::{Error, Success};

pub fn voice_commands() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("1", Voice, "Open Browser", "10:15 AM", Success),
        CommandEntry::new("2", Voice, "Volume Up", "10:12 AM", Success),
        CommandEntry::new("3", Voice, "Launch Spotify", "10:10 AM", Error),
        CommandEntry::new("4", Voice, "Next Slide", "10:05 AM", Success),
    ]
}

pub fn gesture_commands() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("1", Gesture, "Swipe Left", "10:20 AM", Success),
        CommandEntry::new("2", Gesture, "Pinch Zoom", "10:18 AM", Success),
        CommandEntry::new("3", Gesture, "Scroll Down", "10:15 AM", Error),
        CommandEntry::new("4", Gesture, "Click", "10:14 AM", Success),
    ]
}

/// Combined history: the page lists interleaved voice-first, renumbered so
/// ids stay unique across both kinds.
pub fn dashboard_commands() -> Vec<CommandEntry> {
    voice_commands()
        .into_iter()
        .zip(gesture_commands())
        .flat_map(|(voice, gesture)| [voice, gesture])
        .enumerate()
        .map(|(index, entry)| CommandEntry {
            id: CommandId((index + 1).to_string()),
            ..entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::filter_by_kind;

    fn labels_and_outcomes(entries: &[CommandEntry]) -> Vec<(String, &str)> {
        entries
            .iter()
            .map(|e| (e.label.clone(), e.outcome.as_str()))
            .collect()
    }

    #[test]
    fn dashboard_list_interleaves_page_lists() {
        let all = dashboard_commands();
        assert_eq!(
            labels_and_outcomes(&filter_by_kind(&all, Voice)),
            labels_and_outcomes(&voice_commands())
        );
        assert_eq!(
            labels_and_outcomes(&filter_by_kind(&all, Gesture)),
            labels_and_outcomes(&gesture_commands())
        );
    }

    #[test]
    fn dashboard_list_alternates_kinds_with_fresh_ids() {
        let all = dashboard_commands();
        let summary: Vec<(&str, &str, &str)> = all
            .iter()
            .map(|e| (e.id.as_str(), e.kind.as_str(), e.label.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("1", "voice", "Open Browser"),
                ("2", "gesture", "Swipe Left"),
                ("3", "voice", "Volume Up"),
                ("4", "gesture", "Pinch Zoom"),
                ("5", "voice", "Launch Spotify"),
                ("6", "gesture", "Scroll Down"),
                ("7", "voice", "Next Slide"),
                ("8", "gesture", "Click"),
            ]
        );
    }
}
