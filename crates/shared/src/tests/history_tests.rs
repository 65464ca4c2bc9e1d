use super::*;
use crate::demo;
use crate::domain::Tagged;

fn entry(id: &str, kind: CommandKind, label: &str, outcome: CommandOutcome) -> CommandEntry {
    CommandEntry::new(id, kind, label, "10:00 AM", outcome)
}

#[test]
fn filtering_preserves_input_order() {
    let all = demo::dashboard_commands();
    let voice = filter_by_kind(&all, CommandKind::Voice);
    let labels: Vec<&str> = voice.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Open Browser", "Volume Up", "Launch Spotify", "Next Slide"]
    );

    let gesture = filter_by_kind(&all, CommandKind::Gesture);
    let ids: Vec<&str> = gesture.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "4", "6", "8"]);
}

#[test]
fn filtering_skips_unrecognized_kinds() {
    let mut odd = entry("9", CommandKind::Voice, "Hum", CommandOutcome::Success);
    odd.kind = Tagged::Unrecognized("hum".to_string());
    let entries = vec![
        odd,
        entry("1", CommandKind::Voice, "Open Browser", CommandOutcome::Success),
    ];
    assert_eq!(filter_by_kind(&entries, CommandKind::Voice).len(), 1);
}

#[test]
fn stats_count_kinds_and_outcomes() {
    let stats = ActivityStats::from_entries(&demo::dashboard_commands());
    assert_eq!(stats.voice, 4);
    assert_eq!(stats.gesture, 4);
    assert_eq!(stats.succeeded, 6);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.pending, 0);
    assert_eq!(stats.recognition_rate(), Some(75));
}

#[test]
fn recognition_rate_ignores_pending_and_is_absent_without_results() {
    let only_pending = vec![entry("1", CommandKind::Voice, "Open", CommandOutcome::Pending)];
    assert_eq!(ActivityStats::from_entries(&only_pending).recognition_rate(), None);

    let mixed = vec![
        entry("1", CommandKind::Voice, "Open", CommandOutcome::Success),
        entry("2", CommandKind::Voice, "Open", CommandOutcome::Pending),
        entry("3", CommandKind::Gesture, "Click", CommandOutcome::Error),
    ];
    assert_eq!(ActivityStats::from_entries(&mixed).recognition_rate(), Some(50));
}

#[test]
fn popular_commands_rank_by_uses_then_first_appearance() {
    let entries = vec![
        entry("1", CommandKind::Voice, "Volume Up", CommandOutcome::Success),
        entry("2", CommandKind::Voice, "Open Browser", CommandOutcome::Success),
        entry("3", CommandKind::Gesture, "Click", CommandOutcome::Success),
        entry("4", CommandKind::Voice, "Open Browser", CommandOutcome::Error),
        entry("5", CommandKind::Voice, "Close Window", CommandOutcome::Success),
        entry("6", CommandKind::Voice, "Next Slide", CommandOutcome::Success),
    ];

    let ranked = popular_commands(&entries, CommandKind::Voice, 3);
    assert_eq!(
        ranked,
        vec![
            PopularCommand {
                label: "Open Browser".to_string(),
                uses: 2
            },
            PopularCommand {
                label: "Volume Up".to_string(),
                uses: 1
            },
            PopularCommand {
                label: "Close Window".to_string(),
                uses: 1
            },
        ]
    );
    assert!(popular_commands(&[], CommandKind::Gesture, 3).is_empty());
}
