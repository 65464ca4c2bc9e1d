use std::time::Instant;

use eframe::egui;
use shared::{
    domain::CommandKind,
    history::{popular_commands, ActivityStats},
};

use crate::controller::reducer::{format_active_time, ActivityClock};
use crate::ui::app::{GaminatorApp, HistoryTab, Page};
use crate::ui::command_log::show_command_log;
use crate::ui::widgets::{self, StatCardModel};

const POPULAR_LIMIT: usize = 3;

fn page_heading(ui: &mut egui::Ui, muted: egui::Color32, title: &str, subtitle: &str) {
    ui.heading(egui::RichText::new(title).strong());
    ui.label(egui::RichText::new(subtitle).color(muted));
    ui.add_space(12.0);
}

pub(crate) fn dashboard_stat_cards(
    stats: &ActivityStats,
    clock: &ActivityClock,
    now: Instant,
) -> [StatCardModel; 4] {
    [
        StatCardModel {
            icon: "🎤",
            title: "Voice Commands",
            value: stats.count_for(CommandKind::Voice).to_string(),
            description: "In history",
        },
        StatCardModel {
            icon: "✋",
            title: "Gesture Controls",
            value: stats.count_for(CommandKind::Gesture).to_string(),
            description: "In history",
        },
        StatCardModel {
            icon: "⚡",
            title: "Recognition Rate",
            value: stats
                .recognition_rate()
                .map(|rate| format!("{rate}%"))
                .unwrap_or_else(|| "n/a".to_string()),
            description: "Accuracy",
        },
        StatCardModel {
            icon: "🕒",
            title: "Active Time",
            value: format_active_time(clock.elapsed(now)),
            description: if clock.is_running() {
                "Detecting now"
            } else {
                "This session"
            },
        },
    ]
}

/// Shown only when lenient ingestion kept entries of an unknown kind; those
/// entries count toward neither kind card.
pub(crate) fn unrecognized_note(stats: &ActivityStats) -> Option<String> {
    match stats.unrecognized {
        0 => None,
        1 => Some("1 entry has an unrecognized kind".to_string()),
        n => Some(format!("{n} entries have an unrecognized kind")),
    }
}

impl GaminatorApp {
    pub(super) fn show_home_page(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Welcome to GAMINATOR")
                    .size(32.0)
                    .strong()
                    .color(palette.voice),
            );
            ui.label(
                egui::RichText::new("Control your computer with voice and gesture commands")
                    .color(palette.muted_text),
            );
        });
        ui.add_space(20.0);

        let mut target = None;
        ui.columns(2, |columns| {
            let cards = [
                (
                    CommandKind::Voice,
                    "Voice Commands",
                    "Control your computer using simple voice commands for navigation, \
                     application control, and system functions.",
                    "Try Voice Commands →",
                    Page::Voice,
                ),
                (
                    CommandKind::Gesture,
                    "Gesture Control",
                    "Use hand gestures to navigate and interact with your applications \
                     without touching your keyboard or mouse.",
                    "Try Gesture Control →",
                    Page::Gesture,
                ),
            ];
            for (column, (kind, title, body, action, page)) in columns.iter_mut().zip(cards) {
                widgets::card(column, &palette, |ui| {
                    ui.vertical_centered(|ui| {
                        let (icon, color) = match kind {
                            CommandKind::Voice => ("🎤", palette.voice),
                            CommandKind::Gesture => ("✋", palette.gesture),
                        };
                        ui.label(egui::RichText::new(icon).size(32.0).color(color));
                        ui.label(egui::RichText::new(title).size(18.0).strong());
                        ui.label(egui::RichText::new(body).color(palette.muted_text));
                        ui.add_space(8.0);
                        if ui.button(action).clicked() {
                            target = Some(page);
                        }
                    });
                });
            }
        });

        ui.add_space(16.0);
        widgets::card(ui, &palette, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Getting Started").size(16.0).strong());
                ui.label(
                    egui::RichText::new(
                        "GAMINATOR allows you to control your computer without touching it. \
                         Try saying \"Open Browser\" or use a swipe gesture to navigate between apps.",
                    )
                    .color(palette.muted_text),
                );
                ui.add_space(8.0);
                let button = egui::Button::new("Go to Dashboard").fill(palette.accent);
                if ui.add(button).clicked() {
                    target = Some(Page::Dashboard);
                }
            });
        });

        if let Some(page) = target {
            self.page = page;
        }
    }

    pub(super) fn show_voice_page(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        let toggle = self.controls.voice;
        let history = self.commands_of(CommandKind::Voice);
        page_heading(
            ui,
            palette.muted_text,
            "Voice Command Control",
            "Control your system using voice commands",
        );

        let mut toggle_requested = false;
        ui.columns(2, |columns| {
            widgets::card(&mut columns[0], &palette, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Voice Recognition").strong().size(15.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        widgets::status_badge(ui, &palette, toggle.badge_label(), toggle.is_active());
                    });
                });
                ui.add_space(12.0);

                ui.vertical_centered(|ui| {
                    let glyph = if toggle.is_active() { "🎤" } else { "🔇" };
                    let mic = egui::Button::new(egui::RichText::new(glyph).size(32.0))
                        .min_size(egui::vec2(80.0, 80.0))
                        .corner_radius(40.0)
                        .fill(if toggle.is_active() {
                            palette.accent
                        } else {
                            palette.row_background
                        });
                    if ui
                        .add(mic)
                        .on_hover_text(toggle.action_label())
                        .clicked()
                    {
                        toggle_requested = true;
                    }
                });
                ui.add_space(8.0);
                widgets::voice_visualizer(ui, &palette, toggle.is_active());
                ui.add_space(8.0);

                egui::Frame::NONE
                    .fill(palette.row_background)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(12))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.vertical_centered(|ui| {
                            ui.label(egui::RichText::new(toggle.prompt()).color(palette.muted_text));
                        });
                    });
                ui.add_space(12.0);
                widgets::tip_box(
                    ui,
                    &palette,
                    "Voice Command Tips",
                    "Try commands like \"Open Browser\", \"Volume Up\", \"Close Window\", \
                     or \"Scroll Down\" to control your system.",
                );
            });

            show_command_log(&mut columns[1], "voice_history", &history, &palette);
        });

        if toggle_requested {
            self.toggle_detection(CommandKind::Voice);
        }
    }

    pub(super) fn show_gesture_page(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        let toggle = self.controls.gesture;
        let history = self.commands_of(CommandKind::Gesture);
        page_heading(
            ui,
            palette.muted_text,
            "Gesture Control",
            "Control your system using hand gestures",
        );

        let mut toggle_requested = false;
        ui.columns(2, |columns| {
            widgets::card(&mut columns[0], &palette, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Hand Gesture Recognition")
                            .strong()
                            .size(15.0),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        widgets::status_badge(ui, &palette, toggle.badge_label(), toggle.is_active());
                    });
                });
                ui.add_space(12.0);

                widgets::gesture_feed(ui, &palette, toggle.is_active(), toggle.prompt());
                ui.add_space(12.0);

                ui.vertical_centered(|ui| {
                    let button = egui::Button::new(format!("📷 {}", toggle.action_label())).fill(
                        if toggle.is_active() {
                            palette.accent
                        } else {
                            palette.row_background
                        },
                    );
                    if ui.add(button).clicked() {
                        toggle_requested = true;
                    }
                });
                ui.add_space(12.0);
                widgets::tip_box(
                    ui,
                    &palette,
                    "Gesture Control Tips",
                    "Try gestures like swiping left/right to navigate, pinch to zoom, \
                     or raising your hand with an open palm to pause/resume.",
                );
            });

            show_command_log(&mut columns[1], "gesture_history", &history, &palette);
        });

        if toggle_requested {
            self.toggle_detection(CommandKind::Gesture);
        }
    }

    pub(super) fn show_dashboard_page(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        page_heading(
            ui,
            palette.muted_text,
            "Dashboard",
            "Monitor your control activity and performance",
        );

        let stats = ActivityStats::from_entries(&self.commands);
        let cards = dashboard_stat_cards(&stats, &self.controls.clock, Instant::now());
        ui.columns(cards.len(), |columns| {
            for (column, model) in columns.iter_mut().zip(cards.iter()) {
                widgets::stat_card(column, &palette, model);
            }
        });
        if let Some(note) = unrecognized_note(&stats) {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(format!("❔ {note}")).small().color(palette.warning));
        }
        ui.add_space(16.0);

        let mut history_tab = self.history_tab;
        let commands = &self.commands;
        ui.columns(2, |columns| {
            widgets::card(&mut columns[0], &palette, |ui| {
                widgets::card_title(ui, &palette, "📈", "Activity History");
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    for tab in HistoryTab::ALL {
                        ui.selectable_value(&mut history_tab, tab, tab.label());
                    }
                });
                ui.add_space(6.0);
                let selected = history_tab.select(commands);
                show_command_log(ui, ("dashboard_history", history_tab), &selected, &palette);
            });

            widgets::card(&mut columns[1], &palette, |ui| {
                widgets::card_title(ui, &palette, "⌘", "Popular Commands");
                ui.add_space(6.0);
                for (kind, heading) in [
                    (CommandKind::Voice, "Voice Commands"),
                    (CommandKind::Gesture, "Gesture Controls"),
                ] {
                    let ranked = popular_commands(commands, kind, POPULAR_LIMIT);
                    egui::Frame::NONE
                        .fill(palette.row_background)
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::same(10))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(egui::RichText::new(heading).strong());
                            if ranked.is_empty() {
                                ui.label(
                                    egui::RichText::new("No commands yet")
                                        .small()
                                        .color(palette.muted_text),
                                );
                            }
                            for entry in &ranked {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(&entry.label).color(palette.muted_text),
                                    );
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            let uses = if entry.uses == 1 {
                                                "1 time".to_string()
                                            } else {
                                                format!("{} times", entry.uses)
                                            };
                                            widgets::badge(
                                                ui,
                                                &uses,
                                                (
                                                    palette.accent.gamma_multiply(0.25),
                                                    egui::Stroke::NONE,
                                                    palette.text,
                                                ),
                                            );
                                        },
                                    );
                                });
                            }
                        });
                    ui.add_space(8.0);
                }
            });
        });
        self.history_tab = history_tab;
    }
}
