//! Where the bridge gets command history from until a live recognizer exists.

use std::{
    fs,
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::Context;
use shared::{
    demo,
    domain::IngestPolicy,
    protocol::{parse_feed, replay_feed, FeedReplay},
};

pub trait CommandSource: Send {
    fn describe(&self) -> String;

    fn load(&self, policy: IngestPolicy) -> anyhow::Result<FeedReplay>;

    /// Changes whenever the underlying data changes. Sources that never
    /// change return `None`.
    fn fingerprint(&self) -> Option<SystemTime> {
        None
    }
}

pub struct DemoSource;

impl CommandSource for DemoSource {
    fn describe(&self) -> String {
        "demo history".to_string()
    }

    fn load(&self, _policy: IngestPolicy) -> anyhow::Result<FeedReplay> {
        Ok(FeedReplay {
            entries: demo::dashboard_commands(),
            detection: Vec::new(),
        })
    }
}

pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CommandSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self, policy: IngestPolicy) -> anyhow::Result<FeedReplay> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read command log '{}'", self.path.display()))?;
        let events = parse_feed(&raw)?;
        let replay = replay_feed(events, policy)?;
        tracing::debug!(
            path = %self.path.display(),
            entries = replay.entries.len(),
            "loaded command log"
        );
        Ok(replay)
    }

    fn fingerprint(&self) -> Option<SystemTime> {
        fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .ok()
    }
}

pub fn source_for(command_log: Option<&Path>) -> Box<dyn CommandSource> {
    match command_log {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(DemoSource),
    }
}
