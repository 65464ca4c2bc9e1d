use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::{CommandEntry, CommandId, CommandKind, CommandOutcome, IngestPolicy, Tagged},
    error::{CommandLogError, FeedError},
};

/// Wire shape of a command record before validation.
///
/// Field aliases accept the older `type`/`command`/`timestamp`/`status`
/// naming used by the first dashboard prototype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommandEntry {
    pub id: String,
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(alias = "command")]
    pub label: String,
    #[serde(alias = "timestamp")]
    pub occurred_at: String,
    #[serde(alias = "status")]
    pub outcome: String,
}

impl RawCommandEntry {
    pub fn into_entry(
        self,
        index: usize,
        policy: IngestPolicy,
    ) -> Result<CommandEntry, CommandLogError> {
        if self.id.trim().is_empty() {
            return Err(CommandLogError::EmptyId { index });
        }

        let kind = match CommandKind::parse(&self.kind) {
            Some(kind) => Tagged::Known(kind),
            None if policy == IngestPolicy::Lenient => Tagged::Unrecognized(self.kind),
            None => {
                return Err(CommandLogError::UnrecognizedKind {
                    index,
                    value: self.kind,
                })
            }
        };

        let outcome = match CommandOutcome::parse(&self.outcome) {
            Some(outcome) => Tagged::Known(outcome),
            None if policy == IngestPolicy::Lenient => Tagged::Unrecognized(self.outcome),
            None => {
                return Err(CommandLogError::UnrecognizedOutcome {
                    index,
                    value: self.outcome,
                })
            }
        };

        Ok(CommandEntry {
            id: CommandId(self.id),
            kind,
            label: self.label,
            occurred_at: self.occurred_at,
            outcome,
        })
    }
}

/// Validates a batch in order. Ids must be non-empty and unique within the batch.
pub fn ingest_entries(
    raw: Vec<RawCommandEntry>,
    policy: IngestPolicy,
) -> Result<Vec<CommandEntry>, CommandLogError> {
    let mut first_seen: HashMap<String, usize> = HashMap::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());

    for (index, item) in raw.into_iter().enumerate() {
        if let Some(&first_index) = first_seen.get(&item.id) {
            return Err(CommandLogError::DuplicateId {
                index,
                first_index,
                id: item.id,
            });
        }
        let id = item.id.clone();
        let entry = item.into_entry(index, policy)?;
        first_seen.insert(id, index);
        entries.push(entry);
    }

    Ok(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStatus {
    pub modality: CommandKind,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum CommandFeedEvent {
    Snapshot(Vec<RawCommandEntry>),
    EntryRecorded(RawCommandEntry),
    DetectionStatus(DetectionStatus),
}

/// Parses a feed document: a bare entry array, one event, or an event array.
///
/// The shape is picked from the first array element before the typed parse,
/// so a bad document reports the failing field with its line and column.
pub fn parse_feed(text: &str) -> Result<Vec<CommandFeedEvent>, FeedError> {
    let shape = serde_json::from_str::<Value>(text)?;
    let events = match shape {
        Value::Array(items) if items.first().is_some_and(is_feed_event) => {
            serde_json::from_str::<Vec<CommandFeedEvent>>(text)?
        }
        Value::Array(_) => vec![CommandFeedEvent::Snapshot(serde_json::from_str(text)?)],
        _ => vec![serde_json::from_str::<CommandFeedEvent>(text)?],
    };
    Ok(events)
}

// Legacy entries may carry `type`, but only events carry `payload`.
fn is_feed_event(item: &Value) -> bool {
    item.get("payload").is_some()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedReplay {
    pub entries: Vec<CommandEntry>,
    pub detection: Vec<DetectionStatus>,
}

/// Replays feed events into the final entry list and latest detection status
/// per modality. A snapshot replaces everything recorded before it.
pub fn replay_feed(
    events: Vec<CommandFeedEvent>,
    policy: IngestPolicy,
) -> Result<FeedReplay, FeedError> {
    let mut raw = Vec::new();
    let mut detection: Vec<DetectionStatus> = Vec::new();

    for event in events {
        match event {
            CommandFeedEvent::Snapshot(entries) => raw = entries,
            CommandFeedEvent::EntryRecorded(entry) => raw.push(entry),
            CommandFeedEvent::DetectionStatus(status) => {
                detection.retain(|existing| existing.modality != status.modality);
                detection.push(status);
            }
        }
    }

    Ok(FeedReplay {
        entries: ingest_entries(raw, policy)?,
        detection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, kind: &str, outcome: &str) -> RawCommandEntry {
        RawCommandEntry {
            id: id.to_string(),
            kind: kind.to_string(),
            label: format!("command {id}"),
            occurred_at: "10:15 AM".to_string(),
            outcome: outcome.to_string(),
        }
    }

    #[test]
    fn strict_ingest_rejects_unrecognized_kind() {
        let err = ingest_entries(
            vec![raw("1", "voice", "success"), raw("2", "telepathy", "success")],
            IngestPolicy::Strict,
        )
        .expect_err("unknown kind");
        assert_eq!(
            err,
            CommandLogError::UnrecognizedKind {
                index: 1,
                value: "telepathy".to_string()
            }
        );
    }

    #[test]
    fn strict_ingest_rejects_unrecognized_outcome() {
        let err = ingest_entries(vec![raw("1", "gesture", "maybe")], IngestPolicy::Strict)
            .expect_err("unknown outcome");
        assert!(matches!(
            err,
            CommandLogError::UnrecognizedOutcome { index: 0, .. }
        ));
    }

    #[test]
    fn lenient_ingest_keeps_unrecognized_values() {
        let entries = ingest_entries(
            vec![raw("1", "telepathy", "maybe")],
            IngestPolicy::Lenient,
        )
        .expect("lenient ingest");
        assert_eq!(entries[0].kind, Tagged::Unrecognized("telepathy".to_string()));
        assert_eq!(entries[0].outcome, Tagged::Unrecognized("maybe".to_string()));
    }

    #[test]
    fn duplicate_ids_are_rejected_under_every_policy() {
        for policy in [IngestPolicy::Strict, IngestPolicy::Lenient] {
            let err = ingest_entries(
                vec![
                    raw("1", "voice", "success"),
                    raw("2", "voice", "success"),
                    raw("1", "gesture", "error"),
                ],
                policy,
            )
            .expect_err("duplicate id");
            assert_eq!(
                err,
                CommandLogError::DuplicateId {
                    index: 2,
                    first_index: 0,
                    id: "1".to_string()
                }
            );
        }
    }

    #[test]
    fn blank_id_is_rejected() {
        let err = ingest_entries(vec![raw("  ", "voice", "success")], IngestPolicy::Lenient)
            .expect_err("blank id");
        assert_eq!(err, CommandLogError::EmptyId { index: 0 });
    }

    #[test]
    fn accepts_legacy_field_names() {
        let text = r#"[{"id":"1","type":"voice","command":"Open Browser","timestamp":"10:15 AM","status":"success"}]"#;
        let events = parse_feed(text).expect("legacy feed");
        let replay = replay_feed(events, IngestPolicy::Strict).expect("replay");
        assert_eq!(
            replay.entries,
            vec![CommandEntry::new(
                "1",
                CommandKind::Voice,
                "Open Browser",
                "10:15 AM",
                CommandOutcome::Success
            )]
        );
    }

    #[test]
    fn snapshot_replaces_previously_recorded_entries() {
        let events = vec![
            CommandFeedEvent::EntryRecorded(raw("old", "voice", "success")),
            CommandFeedEvent::Snapshot(vec![raw("1", "gesture", "pending")]),
            CommandFeedEvent::EntryRecorded(raw("2", "voice", "error")),
        ];
        let replay = replay_feed(events, IngestPolicy::Strict).expect("replay");
        let ids: Vec<&str> = replay.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn keeps_latest_detection_status_per_modality() {
        let text = r#"[
            {"type":"detection_status","payload":{"modality":"voice","active":true}},
            {"type":"detection_status","payload":{"modality":"gesture","active":true}},
            {"type":"detection_status","payload":{"modality":"voice","active":false}}
        ]"#;
        let replay = replay_feed(parse_feed(text).expect("feed"), IngestPolicy::Strict)
            .expect("replay");
        assert!(replay.entries.is_empty());
        assert_eq!(
            replay.detection,
            vec![
                DetectionStatus {
                    modality: CommandKind::Gesture,
                    active: true
                },
                DetectionStatus {
                    modality: CommandKind::Voice,
                    active: false
                },
            ]
        );
    }

    #[test]
    fn entry_missing_a_field_names_field_and_position() {
        let text = r#"[
            {"id":"1","kind":"voice","label":"Open Browser","occurredAt":"10:15 AM","outcome":"success"},
            {"id":"2","kind":"gesture","occurredAt":"10:20 AM","outcome":"success"}
        ]"#;
        let message = parse_feed(text).expect_err("missing label").to_string();
        assert!(message.contains("missing field `label`"), "{message}");
        assert!(message.contains("line 3"), "{message}");
    }

    #[test]
    fn event_with_bad_payload_reports_event_error() {
        let text = r#"[
            {"type":"entry_recorded","payload":{"id":"1","kind":"voice","label":"Open","occurredAt":"10:15 AM"}}
        ]"#;
        let message = parse_feed(text).expect_err("missing outcome").to_string();
        assert!(message.contains("missing field `outcome`"), "{message}");
        assert!(!message.contains("did not match any variant"), "{message}");
    }

    #[test]
    fn single_event_and_empty_array_are_accepted() {
        let single = parse_feed(r#"{"type":"detection_status","payload":{"modality":"gesture","active":true}}"#)
            .expect("single event");
        assert_eq!(
            single,
            vec![CommandFeedEvent::DetectionStatus(DetectionStatus {
                modality: CommandKind::Gesture,
                active: true
            })]
        );
        assert_eq!(
            parse_feed("[]").expect("empty"),
            vec![CommandFeedEvent::Snapshot(Vec::new())]
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_feed("{not json").expect_err("malformed");
        assert!(matches!(err, FeedError::Parse(_)));
    }
}
