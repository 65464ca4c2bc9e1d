//! Runtime bridge between UI command queue and backend event intake.
//!
//! The worker stands in for the recognition backend: it serves command
//! history from a [`CommandSource`] and acknowledges detection toggles.

use std::{
    thread,
    time::{Duration, Instant, SystemTime},
};

use chrono::Local;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use shared::{
    domain::{CommandKind, IngestPolicy},
    error::FeedError,
    protocol::DetectionStatus,
};

use crate::backend_bridge::{commands::BackendCommand, sources::CommandSource};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone, Copy)]
pub struct BridgeSettings {
    pub policy: IngestPolicy,
    pub refresh_interval: Option<Duration>,
}

pub struct BackendWorker {
    source: Box<dyn CommandSource>,
    policy: IngestPolicy,
    ui_tx: Sender<UiEvent>,
    last_fingerprint: Option<SystemTime>,
}

impl BackendWorker {
    pub fn new(
        source: Box<dyn CommandSource>,
        policy: IngestPolicy,
        ui_tx: Sender<UiEvent>,
    ) -> Self {
        Self {
            source,
            policy,
            ui_tx,
            last_fingerprint: None,
        }
    }

    /// Returns `false` once the UI side has gone away.
    pub fn handle(&mut self, cmd: BackendCommand) -> bool {
        tracing::debug!(command = cmd.name(), "backend command");
        match cmd {
            BackendCommand::LoadCommandLog => self.load(),
            BackendCommand::SetVoiceListening(active) => {
                self.acknowledge_detection(CommandKind::Voice, active)
            }
            BackendCommand::SetGestureDetection(active) => {
                self.acknowledge_detection(CommandKind::Gesture, active)
            }
        }
    }

    /// Reloads when the source reports a change since the last load.
    pub fn poll_source(&mut self) -> bool {
        let current = self.source.fingerprint();
        if current.is_some() && current != self.last_fingerprint {
            tracing::info!(source = %self.source.describe(), "command log changed, reloading");
            return self.load();
        }
        true
    }

    fn load(&mut self) -> bool {
        self.last_fingerprint = self.source.fingerprint();
        let source = self.source.describe();
        match self.source.load(self.policy) {
            Ok(replay) => {
                tracing::info!(
                    source = %source,
                    entries = replay.entries.len(),
                    "command history loaded"
                );
                let refreshed = Local::now().format("%-I:%M %p");
                self.send(UiEvent::Info(format!(
                    "Command history from {source} refreshed at {refreshed}"
                ))) && self.send(UiEvent::CommandLogLoaded {
                    source,
                    entries: replay.entries,
                    detection: replay.detection,
                })
            }
            Err(err) => {
                tracing::error!(source = %source, "failed to load command history: {err:#}");
                let ui_error = match err.downcast_ref::<FeedError>() {
                    Some(feed_err) => {
                        if let FeedError::Entry { source: rejected } = feed_err {
                            tracing::warn!(entry = rejected.index(), "command log rejected at entry");
                        }
                        UiError::from_feed_error(UiErrorContext::LoadCommandLog, feed_err)
                    }
                    None => UiError::from_message(UiErrorContext::LoadCommandLog, format!("{err:#}")),
                };
                self.send(UiEvent::Error(ui_error))
            }
        }
    }

    // No recognizer is attached yet; the requested state is echoed back.
    fn acknowledge_detection(&mut self, modality: CommandKind, active: bool) -> bool {
        tracing::info!(modality = modality.as_str(), active, "detection toggled");
        self.send(UiEvent::DetectionStatusChanged(DetectionStatus {
            modality,
            active,
        }))
    }

    fn send(&self, event: UiEvent) -> bool {
        match self.ui_tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue is full; dropping event");
                true
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// When the source is next due for a change check. Commands arriving in
/// between do not push the check back.
#[derive(Debug, Clone, Copy)]
pub struct PollSchedule {
    interval: Option<Duration>,
    next_due: Option<Instant>,
}

impl PollSchedule {
    pub fn new(interval: Option<Duration>, now: Instant) -> Self {
        Self {
            interval,
            next_due: interval.map(|interval| now + interval),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// True when a check is due; the next check is then scheduled from `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match (self.next_due, self.interval) {
            (Some(due), Some(interval)) if now >= due => {
                self.next_due = Some(now + interval);
                true
            }
            _ => false,
        }
    }
}

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Box<dyn CommandSource>,
    settings: BridgeSettings,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut worker = BackendWorker::new(source, settings.policy, ui_tx);
        tracing::info!(source = %worker.source.describe(), "backend bridge ready");

        let mut schedule = PollSchedule::new(settings.refresh_interval, Instant::now());
        loop {
            let next = match schedule.deadline() {
                Some(deadline) => cmd_rx.recv_deadline(deadline),
                None => cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };
            let mut keep_running = match next {
                Ok(cmd) => worker.handle(cmd),
                Err(RecvTimeoutError::Timeout) => true,
                Err(RecvTimeoutError::Disconnected) => false,
            };
            if keep_running && schedule.take_due(Instant::now()) {
                keep_running = worker.poll_source();
            }
            if !keep_running {
                break;
            }
        }

        tracing::info!("backend bridge stopped");
    })
}
