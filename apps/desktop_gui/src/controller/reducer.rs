//! Detection toggle state and the activity clock behind the dashboard.

use std::time::{Duration, Instant};

use shared::{domain::CommandKind, protocol::DetectionStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionToggle {
    modality: CommandKind,
    active: bool,
}

impl DetectionToggle {
    pub fn new(modality: CommandKind) -> Self {
        Self {
            modality,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggled(self) -> Self {
        Self {
            active: !self.active,
            ..self
        }
    }

    pub fn badge_label(&self) -> &'static str {
        match (self.modality, self.active) {
            (CommandKind::Voice, true) => "Listening",
            (CommandKind::Voice, false) => "Idle",
            (CommandKind::Gesture, true) => "Active",
            (CommandKind::Gesture, false) => "Inactive",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match (self.modality, self.active) {
            (CommandKind::Voice, true) => "Listening...",
            (CommandKind::Voice, false) => "Click the microphone to start",
            (CommandKind::Gesture, true) => "Scanning for hand gestures...",
            (CommandKind::Gesture, false) => "Camera feed not active",
        }
    }

    pub fn action_label(&self) -> &'static str {
        match (self.modality, self.active) {
            (CommandKind::Voice, true) => "Stop Listening",
            (CommandKind::Voice, false) => "Start Listening",
            (CommandKind::Gesture, true) => "Stop Camera",
            (CommandKind::Gesture, false) => "Start Camera",
        }
    }
}

/// Accumulates time during which any detection is running.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityClock {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl ActivityClock {
    pub fn set_running(&mut self, running: bool, now: Instant) {
        match (running, self.running_since) {
            (true, None) => self.running_since = Some(now),
            (false, Some(since)) => {
                self.accumulated += now.saturating_duration_since(since);
                self.running_since = None;
            }
            _ => {}
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        let current = self
            .running_since
            .map(|since| now.saturating_duration_since(since))
            .unwrap_or_default();
        self.accumulated + current
    }
}

pub fn format_active_time(elapsed: Duration) -> String {
    let minutes = elapsed.as_secs() / 60;
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[derive(Debug, Clone, Copy)]
pub struct ControlState {
    pub voice: DetectionToggle,
    pub gesture: DetectionToggle,
    pub clock: ActivityClock,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            voice: DetectionToggle::new(CommandKind::Voice),
            gesture: DetectionToggle::new(CommandKind::Gesture),
            clock: ActivityClock::default(),
        }
    }
}

impl ControlState {
    pub fn toggle(&mut self, modality: CommandKind, now: Instant) -> DetectionToggle {
        let toggle = self.toggle_mut(modality);
        *toggle = toggle.toggled();
        let updated = *toggle;
        self.sync_clock(now);
        updated
    }

    /// Applies a status reported by the bridge. Repeating the current state is a no-op.
    pub fn apply_status(&mut self, status: DetectionStatus, now: Instant) {
        self.toggle_mut(status.modality).active = status.active;
        self.sync_clock(now);
    }

    pub fn any_active(&self) -> bool {
        self.voice.active || self.gesture.active
    }

    fn toggle_mut(&mut self, modality: CommandKind) -> &mut DetectionToggle {
        match modality {
            CommandKind::Voice => &mut self.voice,
            CommandKind::Gesture => &mut self.gesture,
        }
    }

    fn sync_clock(&mut self, now: Instant) {
        let running = self.any_active();
        self.clock.set_running(running, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_toggle_labels_follow_state() {
        let idle = DetectionToggle::new(CommandKind::Voice);
        assert_eq!(idle.badge_label(), "Idle");
        assert_eq!(idle.prompt(), "Click the microphone to start");

        let listening = idle.toggled();
        assert!(listening.is_active());
        assert_eq!(listening.badge_label(), "Listening");
        assert_eq!(listening.prompt(), "Listening...");
        assert!(!listening.toggled().is_active());
    }

    #[test]
    fn gesture_toggle_labels_follow_state() {
        let inactive = DetectionToggle::new(CommandKind::Gesture);
        assert_eq!(inactive.badge_label(), "Inactive");
        assert_eq!(inactive.action_label(), "Start Camera");
        assert_eq!(inactive.prompt(), "Camera feed not active");

        let active = inactive.toggled();
        assert_eq!(active.badge_label(), "Active");
        assert_eq!(active.action_label(), "Stop Camera");
        assert_eq!(active.prompt(), "Scanning for hand gestures...");
    }

    #[test]
    fn clock_runs_while_any_detection_is_active() {
        let start = Instant::now();
        let mut state = ControlState::default();

        state.toggle(CommandKind::Voice, start);
        state.toggle(CommandKind::Gesture, start + Duration::from_secs(60));
        state.toggle(CommandKind::Voice, start + Duration::from_secs(120));
        assert!(state.clock.is_running());

        state.toggle(CommandKind::Gesture, start + Duration::from_secs(300));
        assert!(!state.clock.is_running());
        assert_eq!(
            state.clock.elapsed(start + Duration::from_secs(900)),
            Duration::from_secs(300)
        );
    }

    #[test]
    fn repeated_bridge_status_does_not_restart_clock() {
        let start = Instant::now();
        let mut state = ControlState::default();
        let listening = DetectionStatus {
            modality: CommandKind::Voice,
            active: true,
        };

        state.apply_status(listening, start);
        state.apply_status(listening, start + Duration::from_secs(30));
        assert!(state.voice.is_active());
        assert_eq!(
            state.clock.elapsed(start + Duration::from_secs(90)),
            Duration::from_secs(90)
        );
    }

    #[test]
    fn formats_active_time_in_hours_and_minutes() {
        assert_eq!(format_active_time(Duration::ZERO), "0h 0m");
        assert_eq!(format_active_time(Duration::from_secs(59)), "0h 0m");
        assert_eq!(
            format_active_time(Duration::from_secs(3 * 3600 + 24 * 60 + 10)),
            "3h 24m"
        );
    }
}
