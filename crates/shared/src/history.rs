//! Caller-side helpers over an immutable command sequence.
//!
//! The log view renders whatever it is given; selecting a subset or deriving
//! figures from the sequence happens here, before the view sees it.

use std::collections::HashMap;

use crate::domain::{CommandEntry, CommandKind, CommandOutcome};

/// Entries of one kind, in their original order.
pub fn filter_by_kind(entries: &[CommandEntry], kind: CommandKind) -> Vec<CommandEntry> {
    entries
        .iter()
        .filter(|entry| entry.is_kind(kind))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub voice: usize,
    pub gesture: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub pending: usize,
    pub unrecognized: usize,
}

impl ActivityStats {
    pub fn from_entries(entries: &[CommandEntry]) -> Self {
        let mut stats = Self::default();
        for entry in entries {
            match entry.kind.known() {
                Some(CommandKind::Voice) => stats.voice += 1,
                Some(CommandKind::Gesture) => stats.gesture += 1,
                None => stats.unrecognized += 1,
            }
            match entry.outcome.known() {
                Some(CommandOutcome::Success) => stats.succeeded += 1,
                Some(CommandOutcome::Error) => stats.failed += 1,
                Some(CommandOutcome::Pending) => stats.pending += 1,
                None => {}
            }
        }
        stats
    }

    pub fn count_for(&self, kind: CommandKind) -> usize {
        match kind {
            CommandKind::Voice => self.voice,
            CommandKind::Gesture => self.gesture,
        }
    }

    /// Share of settled commands that succeeded, in percent. Pending entries
    /// have no result yet and are left out.
    pub fn recognition_rate(&self) -> Option<u8> {
        let settled = self.succeeded + self.failed;
        if settled == 0 {
            return None;
        }
        Some(((self.succeeded as f64 / settled as f64) * 100.0).round() as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopularCommand {
    pub label: String,
    pub uses: usize,
}

/// Most used labels of one kind. Ties keep first-appearance order.
pub fn popular_commands(
    entries: &[CommandEntry],
    kind: CommandKind,
    limit: usize,
) -> Vec<PopularCommand> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for entry in entries.iter().filter(|entry| entry.is_kind(kind)) {
        let count = counts.entry(entry.label.as_str()).or_insert(0);
        if *count == 0 {
            order.push(entry.label.as_str());
        }
        *count += 1;
    }

    let mut ranked: Vec<PopularCommand> = order
        .into_iter()
        .map(|label| PopularCommand {
            label: label.to_string(),
            uses: counts.get(label).copied().unwrap_or_default(),
        })
        .collect();
    // stable sort keeps first-appearance order among ties
    ranked.sort_by(|a, b| b.uses.cmp(&a.uses));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
