use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{CommandEntry, CommandKind},
    history::filter_by_kind,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::ControlState;
use crate::ui::theme::{self, Palette};

pub const UI_STATE_STORAGE_KEY: &str = "gaminator.ui_state";
pub const APP_TITLE: &str = "GAMINATOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Page {
    #[default]
    Home,
    Voice,
    Gesture,
    Dashboard,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Voice, Page::Gesture, Page::Dashboard];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Voice => "Voice",
            Self::Gesture => "Gesture",
            Self::Dashboard => "Dashboard",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Home => "🏠",
            Self::Voice => "🎤",
            Self::Gesture => "✋",
            Self::Dashboard => "📊",
        }
    }
}

/// Dashboard history tabs. Each tab hands a pre-filtered subset to the log view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HistoryTab {
    #[default]
    All,
    Voice,
    Gesture,
}

impl HistoryTab {
    pub const ALL: [HistoryTab; 3] = [HistoryTab::All, HistoryTab::Voice, HistoryTab::Gesture];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Commands",
            Self::Voice => "Voice Only",
            Self::Gesture => "Gestures Only",
        }
    }

    pub fn select(self, entries: &[CommandEntry]) -> Vec<CommandEntry> {
        match self {
            Self::All => entries.to_vec(),
            Self::Voice => filter_by_kind(entries, CommandKind::Voice),
            Self::Gesture => filter_by_kind(entries, CommandKind::Gesture),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PersistedUiState {
    pub page: Page,
    pub history_tab: HistoryTab,
}

pub struct GaminatorApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(super) palette: Palette,
    style_applied: bool,
    pub(super) page: Page,
    pub(super) history_tab: HistoryTab,
    pub(super) commands: Vec<CommandEntry>,
    pub(super) source: Option<String>,
    pub(super) controls: ControlState,
    pub(super) status: String,
    status_banner: Option<UiError>,
}

impl GaminatorApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedUiState>,
    ) -> Self {
        let persisted = persisted.unwrap_or_default();
        let mut app = Self {
            cmd_tx,
            ui_rx,
            palette: Palette::futuristic_dark(),
            style_applied: false,
            page: persisted.page,
            history_tab: persisted.history_tab,
            commands: Vec::new(),
            source: None,
            controls: ControlState::default(),
            status: "Loading command history...".to_string(),
            status_banner: None,
        };
        if !app.dispatch(BackendCommand::LoadCommandLog) {
            app.raise(UiErrorContext::BackendStartup);
        }
        app
    }

    pub(super) fn dispatch(&mut self, cmd: BackendCommand) -> bool {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status)
    }

    /// Flips the toggle locally and asks the bridge to follow. The flip is
    /// undone when the request never reaches the bridge.
    pub(super) fn toggle_detection(&mut self, modality: CommandKind) {
        let toggle = self.controls.toggle(modality, Instant::now());
        let cmd = match modality {
            CommandKind::Voice => BackendCommand::SetVoiceListening(toggle.is_active()),
            CommandKind::Gesture => BackendCommand::SetGestureDetection(toggle.is_active()),
        };
        if !self.dispatch(cmd) {
            self.controls.toggle(modality, Instant::now());
            self.raise(UiErrorContext::Detection);
        }
    }

    fn raise(&mut self, context: UiErrorContext) {
        self.status_banner = Some(UiError::from_message(context, self.status.clone()));
    }

    pub(super) fn commands_of(&self, kind: CommandKind) -> Vec<CommandEntry> {
        filter_by_kind(&self.commands, kind)
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::CommandLogLoaded {
                    source,
                    entries,
                    detection,
                } => {
                    tracing::debug!(source = %source, entries = entries.len(), "history received");
                    let now = Instant::now();
                    for status in detection {
                        self.controls.apply_status(status, now);
                    }
                    self.commands = entries;
                    self.source = Some(source);
                    if self
                        .status_banner
                        .as_ref()
                        .is_some_and(|err| err.context() == UiErrorContext::LoadCommandLog)
                    {
                        self.status_banner = None;
                    }
                }
                UiEvent::DetectionStatusChanged(status) => {
                    self.controls.apply_status(status, Instant::now());
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "{}",
                        err.message()
                    );
                    self.status = err.headline();
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn apply_style_if_needed(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }
        let mut style = (*ctx.style()).clone();
        style.visuals = theme::visuals_for_palette(&self.palette);
        style.text_styles = theme::text_styles();
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        ctx.set_style(style);
        self.style_applied = true;
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        let palette = self.palette;
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::NONE
                    .fill(palette.nav_background)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("⚙").size(20.0).color(palette.accent));
                    ui.label(
                        egui::RichText::new(APP_TITLE)
                            .size(22.0)
                            .strong()
                            .color(palette.voice),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new("System Active")
                                .small()
                                .color(palette.muted_text),
                        );
                        let (dot, _) =
                            ui.allocate_exact_size(egui::vec2(8.0, 8.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot.center(), 4.0, palette.positive);
                        ui.add_space(12.0);
                        ui.label(
                            egui::RichText::new(&self.status)
                                .small()
                                .color(palette.muted_text),
                        );
                    });
                });
            });
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        let palette = self.palette;
        egui::TopBottomPanel::bottom("nav")
            .frame(
                egui::Frame::NONE
                    .fill(palette.nav_background)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                ui.columns(Page::ALL.len(), |columns| {
                    for (column, page) in columns.iter_mut().zip(Page::ALL) {
                        let selected = self.page == page;
                        let text = egui::RichText::new(format!("{}\n{}", page.icon(), page.label()))
                            .color(if selected {
                                palette.text
                            } else {
                                palette.muted_text
                            });
                        let button = egui::Button::new(text)
                            .fill(if selected {
                                palette.accent
                            } else {
                                egui::Color32::TRANSPARENT
                            })
                            .min_size(egui::vec2(column.available_width(), 44.0));
                        if column.add(button).clicked() {
                            self.page = page;
                        }
                    }
                });
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };

        egui::Frame::NONE
            .fill(self.palette.destructive.gamma_multiply(0.35))
            .stroke(egui::Stroke::new(1.0, self.palette.negative))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(banner.headline()).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                        if banner.context() == UiErrorContext::LoadCommandLog
                            && ui.button("Retry").clicked()
                        {
                            self.dispatch(BackendCommand::LoadCommandLog);
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }
}

impl eframe::App for GaminatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_style_if_needed(ctx);

        self.show_header(ctx);
        self.show_nav_bar(ctx);

        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(self.palette.app_background)
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                self.show_status_banner(ui);
                let page = self.page;
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| match page {
                        Page::Home => self.show_home_page(ui),
                        Page::Voice => self.show_voice_page(ui),
                        Page::Gesture => self.show_gesture_page(ui),
                        Page::Dashboard => self.show_dashboard_page(ui),
                    });
            });

        // Visualizers animate only while something is detecting.
        if self.controls.any_active() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedUiState {
            page: self.page,
            history_tab: self.history_tab,
        };
        if let Ok(serialized) = serde_json::to_string(&state) {
            storage.set_string(UI_STATE_STORAGE_KEY, serialized);
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::{demo, protocol::DetectionStatus};

    use super::*;
    use crate::controller::events::UiErrorCategory;

    fn app() -> (GaminatorApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        (GaminatorApp::new(cmd_tx, ui_rx, None), cmd_rx, ui_tx)
    }

    #[test]
    fn requests_history_on_startup() {
        let (app, cmd_rx, _ui_tx) = app();
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::LoadCommandLog));
        assert_eq!(app.page, Page::Home);
        assert!(app.commands.is_empty());
    }

    #[test]
    fn history_tabs_pre_filter_in_order() {
        let all = demo::dashboard_commands();
        assert_eq!(HistoryTab::All.select(&all), all);
        let gesture_ids: Vec<String> = HistoryTab::Gesture
            .select(&all)
            .into_iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(gesture_ids, vec!["2", "4", "6", "8"]);
        assert!(HistoryTab::Voice
            .select(&all)
            .iter()
            .all(|e| e.is_kind(CommandKind::Voice)));
    }

    #[test]
    fn loaded_history_and_detection_are_applied() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::CommandLogLoaded {
                source: "demo history".to_string(),
                entries: demo::dashboard_commands(),
                detection: vec![DetectionStatus {
                    modality: CommandKind::Gesture,
                    active: true,
                }],
            })
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.commands.len(), 8);
        assert_eq!(app.source.as_deref(), Some("demo history"));
        assert!(app.controls.gesture.is_active());
        assert_eq!(app.commands_of(CommandKind::Voice).len(), 4);
    }

    #[test]
    fn toggling_dispatches_new_state_to_bridge() {
        let (mut app, cmd_rx, _ui_tx) = app();
        let _ = cmd_rx.try_recv();

        app.toggle_detection(CommandKind::Voice);
        assert!(app.controls.voice.is_active());
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::SetVoiceListening(true)));

        app.toggle_detection(CommandKind::Voice);
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::SetVoiceListening(false)));
    }

    #[test]
    fn undeliverable_toggle_is_rolled_back() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);

        app.toggle_detection(CommandKind::Gesture);
        assert!(!app.controls.gesture.is_active());
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.context(), UiErrorContext::Detection);
        assert_eq!(banner.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn startup_without_bridge_shows_startup_banner() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (_ui_tx, ui_rx) = bounded(4);
        drop(cmd_rx);
        let app = GaminatorApp::new(cmd_tx, ui_rx, None);
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.context(), UiErrorContext::BackendStartup);
    }

    #[test]
    fn load_error_shows_banner_until_next_successful_load() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::LoadCommandLog,
                "failed to read command log 'x.json': No such file or directory",
            )))
            .expect("send");
        app.process_ui_events();
        let banner = app.status_banner.as_ref().expect("banner");
        assert_eq!(banner.category(), UiErrorCategory::Io);

        ui_tx
            .send(UiEvent::CommandLogLoaded {
                source: "x.json".to_string(),
                entries: Vec::new(),
                detection: Vec::new(),
            })
            .expect("send");
        app.process_ui_events();
        assert!(app.status_banner.is_none());
    }

    #[test]
    fn persisted_state_restores_page_and_tab() {
        let (cmd_tx, _cmd_rx) = bounded(4);
        let (_ui_tx, ui_rx) = bounded(4);
        let restored: PersistedUiState =
            serde_json::from_str(r#"{"page":"Dashboard","history_tab":"Gesture"}"#)
                .expect("state");
        let app = GaminatorApp::new(cmd_tx, ui_rx, Some(restored));
        assert_eq!(app.page, Page::Dashboard);
        assert_eq!(app.history_tab, HistoryTab::Gesture);

        let partial: PersistedUiState =
            serde_json::from_str(r#"{"page":"Voice"}"#).expect("partial state");
        assert_eq!(partial.history_tab, HistoryTab::All);
    }
}
