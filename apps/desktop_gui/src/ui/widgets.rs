use std::f32::consts::PI;

use eframe::egui;

use crate::ui::theme::Palette;

pub const VISUALIZER_BARS: usize = 12;
const BAR_IDLE_HEIGHT: f32 = 5.0;
const BAR_AMPLITUDE: f32 = 30.0;

pub fn card<R>(
    ui: &mut egui::Ui,
    palette: &Palette,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    egui::Frame::NONE
        .fill(palette.card_background)
        .stroke(egui::Stroke::new(1.0, palette.card_stroke))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::same(14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

pub fn card_title(ui: &mut egui::Ui, palette: &Palette, icon: &str, title: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(icon).color(palette.accent));
        ui.label(egui::RichText::new(title).strong().size(15.0));
    });
}

/// Small pill label; `colors` is `(fill, stroke, text)`.
pub fn badge(
    ui: &mut egui::Ui,
    text: &str,
    colors: (egui::Color32, egui::Stroke, egui::Color32),
) -> egui::Response {
    let (fill, stroke, text_color) = colors;
    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(9.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).small().color(text_color));
        })
        .response
}

pub fn status_badge(ui: &mut egui::Ui, palette: &Palette, text: &str, active: bool) {
    let colors = if active {
        (palette.accent, egui::Stroke::NONE, palette.text)
    } else {
        (
            egui::Color32::TRANSPARENT,
            egui::Stroke::new(1.0, palette.card_stroke),
            palette.muted_text,
        )
    };
    badge(ui, text, colors);
}

pub fn tip_box(ui: &mut egui::Ui, palette: &Palette, title: &str, body: &str) {
    egui::Frame::NONE
        .fill(palette.row_background)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                ui.label(egui::RichText::new("ℹ").color(palette.accent).size(16.0));
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(title).strong());
                    ui.label(egui::RichText::new(body).color(palette.muted_text));
                });
            });
        });
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCardModel {
    pub icon: &'static str,
    pub title: &'static str,
    pub value: String,
    pub description: &'static str,
}

pub fn stat_card(ui: &mut egui::Ui, palette: &Palette, model: &StatCardModel) {
    card(ui, palette, |ui| {
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(model.title)
                        .small()
                        .color(palette.muted_text),
                );
                ui.label(egui::RichText::new(&model.value).size(22.0).strong());
                ui.label(
                    egui::RichText::new(model.description)
                        .small()
                        .color(palette.muted_text),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                egui::Frame::NONE
                    .fill(palette.row_background)
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(6))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(model.icon).size(18.0));
                    });
            });
        });
    });
}

/// Bar heights in points. Idle bars sit flat; active bars follow a sine
/// envelope across the row that drifts with `time`.
pub fn visualizer_bar_heights(active: bool, time: f64) -> [f32; VISUALIZER_BARS] {
    let mut heights = [BAR_IDLE_HEIGHT; VISUALIZER_BARS];
    if !active {
        return heights;
    }
    for (i, height) in heights.iter_mut().enumerate() {
        let position = i as f32 / (VISUALIZER_BARS - 1) as f32 * PI;
        let drift = (time as f32 * 6.0) + i as f32 * 0.7;
        *height = BAR_AMPLITUDE * (position + drift.sin() * 0.5).sin().abs() + BAR_IDLE_HEIGHT;
    }
    heights
}

pub fn voice_visualizer(ui: &mut egui::Ui, palette: &Palette, active: bool) {
    let time = ui.input(|i| i.time);
    let heights = visualizer_bar_heights(active, time);
    let bar_width = 8.0;
    let gap = 4.0;
    let total_width = VISUALIZER_BARS as f32 * (bar_width + gap) - gap;
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), BAR_AMPLITUDE + BAR_IDLE_HEIGHT + 10.0),
        egui::Sense::hover(),
    );
    let left = rect.center().x - total_width / 2.0;
    let fill = palette.accent.gamma_multiply(0.6);
    for (i, height) in heights.iter().enumerate() {
        let x = left + i as f32 * (bar_width + gap);
        let bar = egui::Rect::from_min_max(
            egui::pos2(x, rect.bottom() - height),
            egui::pos2(x + bar_width, rect.bottom()),
        );
        ui.painter()
            .rect_filled(bar, egui::CornerRadius::same(4), fill);
    }
}

/// Camera placeholder. While detecting, a scan line sweeps the frame and the
/// corner markers pulse.
pub fn gesture_feed(ui: &mut egui::Ui, palette: &Palette, detecting: bool, message: &str) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, width * 9.0 / 16.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(
        rect,
        egui::CornerRadius::same(8),
        egui::Color32::from_black_alpha(153),
    );

    let text_color = if detecting {
        palette.gesture
    } else {
        palette.muted_text
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        message,
        egui::FontId::proportional(14.0),
        text_color,
    );

    if !detecting {
        return;
    }

    let time = ui.input(|i| i.time) as f32;
    let sweep = (time * 0.5).fract();
    let y = rect.top() + rect.height() * sweep;
    painter.line_segment(
        [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
        egui::Stroke::new(1.0, palette.gesture.gamma_multiply(0.6)),
    );

    let arm = 24.0;
    let corners = [
        (rect.left_top(), egui::vec2(1.0, 1.0)),
        (rect.right_top(), egui::vec2(-1.0, 1.0)),
        (rect.left_bottom(), egui::vec2(1.0, -1.0)),
        (rect.right_bottom(), egui::vec2(-1.0, -1.0)),
    ];
    for (i, (corner, dir)) in corners.into_iter().enumerate() {
        let pulse = 0.3 + 0.7 * ((time * PI / 2.0) - i as f32 * 0.5 * PI / 2.0).sin().abs();
        let stroke = egui::Stroke::new(2.0, palette.gesture.gamma_multiply(pulse));
        painter.line_segment([corner, corner + egui::vec2(arm * dir.x, 0.0)], stroke);
        painter.line_segment([corner, corner + egui::vec2(0.0, arm * dir.y)], stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_visualizer_is_flat() {
        assert_eq!(visualizer_bar_heights(false, 12.5), [5.0; VISUALIZER_BARS]);
    }

    #[test]
    fn active_visualizer_stays_within_envelope() {
        for step in 0..50 {
            let heights = visualizer_bar_heights(true, step as f64 * 0.1);
            for height in heights {
                assert!((5.0..=35.0).contains(&height), "height {height}");
            }
        }
    }
}
