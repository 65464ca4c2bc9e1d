//! Command history card.
//!
//! [`CommandLogView::build`] turns the caller's sequence into rows without
//! touching egui, so everything the card shows is decided there. The painter
//! in [`show_command_log`] only lays those rows out. The view never filters,
//! sorts, or otherwise reshapes its input.

use std::hash::Hash;

use eframe::egui;
use shared::domain::{CommandEntry, CommandId, CommandKind, CommandOutcome, Tagged};

use crate::ui::theme::Palette;
use crate::ui::widgets;

pub const CARD_TITLE: &str = "Command History";
pub const EMPTY_PLACEHOLDER: &str = "No commands recorded yet";

const LIST_HEIGHT: f32 = 288.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindIcon {
    Microphone,
    Hand,
    Unknown,
}

impl KindIcon {
    pub fn for_kind(kind: &Tagged<CommandKind>) -> Self {
        match kind {
            Tagged::Known(CommandKind::Voice) => Self::Microphone,
            Tagged::Known(CommandKind::Gesture) => Self::Hand,
            Tagged::Unrecognized(_) => Self::Unknown,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Microphone => "🎤",
            Self::Hand => "✋",
            Self::Unknown => "❔",
        }
    }

    pub fn color(self, palette: &Palette) -> egui::Color32 {
        match self {
            Self::Microphone => palette.voice,
            Self::Hand => palette.gesture,
            Self::Unknown => palette.warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    /// Filled with the accent color.
    Default,
    Destructive,
    Outline,
    /// Outcome text outside the known set.
    Unknown,
}

impl BadgeStyle {
    pub fn for_outcome(outcome: &Tagged<CommandOutcome>) -> Self {
        match outcome {
            Tagged::Known(CommandOutcome::Success) => Self::Default,
            Tagged::Known(CommandOutcome::Error) => Self::Destructive,
            Tagged::Known(CommandOutcome::Pending) => Self::Outline,
            Tagged::Unrecognized(_) => Self::Unknown,
        }
    }

    pub fn colors(self, palette: &Palette) -> (egui::Color32, egui::Stroke, egui::Color32) {
        match self {
            Self::Default => (palette.accent, egui::Stroke::NONE, palette.text),
            Self::Destructive => (palette.destructive, egui::Stroke::NONE, palette.text),
            Self::Outline => (
                egui::Color32::TRANSPARENT,
                egui::Stroke::new(1.0, palette.card_stroke),
                palette.text,
            ),
            Self::Unknown => (
                egui::Color32::TRANSPARENT,
                egui::Stroke::new(1.0, palette.warning),
                palette.warning,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRow<'a> {
    pub key: &'a CommandId,
    pub icon: KindIcon,
    pub label: &'a str,
    pub badge: BadgeStyle,
    pub badge_text: &'a str,
    pub timestamp: &'a str,
}

impl<'a> CommandRow<'a> {
    fn from_entry(entry: &'a CommandEntry) -> Self {
        Self {
            key: &entry.id,
            icon: KindIcon::for_kind(&entry.kind),
            label: &entry.label,
            badge: BadgeStyle::for_outcome(&entry.outcome),
            badge_text: entry.outcome.as_str(),
            timestamp: &entry.occurred_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLogView<'a> {
    Placeholder(&'static str),
    Rows(Vec<CommandRow<'a>>),
}

impl<'a> CommandLogView<'a> {
    pub fn build(entries: &'a [CommandEntry]) -> Self {
        if entries.is_empty() {
            return Self::Placeholder(EMPTY_PLACEHOLDER);
        }
        Self::Rows(entries.iter().map(CommandRow::from_entry).collect())
    }

    pub fn rows(&self) -> &[CommandRow<'a>] {
        match self {
            Self::Placeholder(_) => &[],
            Self::Rows(rows) => rows,
        }
    }
}

pub fn show_command_log(
    ui: &mut egui::Ui,
    id_salt: impl Hash,
    entries: &[CommandEntry],
    palette: &Palette,
) {
    let view = CommandLogView::build(entries);
    widgets::card(ui, palette, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("🕒").color(palette.muted_text));
            ui.label(egui::RichText::new(CARD_TITLE).strong());
        });
        ui.add_space(6.0);

        egui::ScrollArea::vertical()
            .id_salt(id_salt)
            .max_height(LIST_HEIGHT)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if let CommandLogView::Placeholder(message) = &view {
                    ui.add_space(12.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(*message).color(palette.muted_text));
                    });
                    ui.add_space(12.0);
                    return;
                }
                for row in view.rows() {
                    ui.push_id(row.key.as_str(), |ui| render_row(ui, row, palette));
                    ui.add_space(6.0);
                }
            });
    });
}

fn render_row(ui: &mut egui::Ui, row: &CommandRow<'_>, palette: &Palette) {
    let frame = egui::Frame::NONE
        .fill(palette.row_background)
        .stroke(egui::Stroke::new(1.0, palette.card_stroke))
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(8, 6));

    let response = frame
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.label(
                    egui::RichText::new(row.icon.glyph())
                        .size(16.0)
                        .color(row.icon.color(palette)),
                );
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.add(
                            egui::Label::new(egui::RichText::new(row.label).strong()).truncate(),
                        );
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            widgets::badge(ui, row.badge_text, row.badge.colors(palette));
                        });
                    });
                    ui.label(
                        egui::RichText::new(row.timestamp)
                            .small()
                            .color(palette.muted_text),
                    );
                });
            });
        })
        .response;

    if response.hovered() {
        ui.painter().rect_stroke(
            response.rect,
            egui::CornerRadius::same(6),
            egui::Stroke::new(1.0, palette.accent_hover),
            egui::StrokeKind::Inside,
        );
    }
}

#[cfg(test)]
#[path = "tests/command_log_tests.rs"]
mod tests;
