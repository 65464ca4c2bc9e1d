//! The dashboard's fixed dark palette and the egui visuals derived from it.

use std::collections::BTreeMap;

use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    // Backgrounds:
    pub app_background: egui::Color32,
    pub card_background: egui::Color32,
    pub card_stroke: egui::Color32,
    pub row_background: egui::Color32,
    pub row_hover: egui::Color32,
    pub nav_background: egui::Color32,

    // Text:
    pub text: egui::Color32,
    pub muted_text: egui::Color32,

    // Emphasis:
    pub accent: egui::Color32,
    pub accent_hover: egui::Color32,
    pub destructive: egui::Color32,
    pub warning: egui::Color32,
    pub positive: egui::Color32,
    pub negative: egui::Color32,

    // Modality icons:
    pub voice: egui::Color32,
    pub gesture: egui::Color32,
}

impl Palette {
    pub fn futuristic_dark() -> Self {
        Self {
            app_background: egui::Color32::from_rgb(26, 31, 44),
            card_background: egui::Color32::from_rgb(34, 40, 56),
            card_stroke: egui::Color32::from_rgb(62, 70, 98),
            row_background: egui::Color32::from_rgb(42, 48, 66),
            row_hover: egui::Color32::from_rgb(52, 59, 80),
            nav_background: egui::Color32::from_rgb(22, 26, 37),
            text: egui::Color32::from_rgb(255, 255, 255),
            muted_text: egui::Color32::from_rgb(148, 163, 184),
            accent: egui::Color32::from_rgb(139, 92, 246),
            accent_hover: egui::Color32::from_rgb(124, 58, 237),
            destructive: egui::Color32::from_rgb(239, 68, 68),
            warning: egui::Color32::from_rgb(245, 158, 11),
            positive: egui::Color32::from_rgb(74, 222, 128),
            negative: egui::Color32::from_rgb(248, 113, 113),
            voice: egui::Color32::from_rgb(96, 165, 250),
            gesture: egui::Color32::from_rgb(74, 222, 128),
        }
    }
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn visuals_for_palette(palette: &Palette) -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(palette.text);
    visuals.window_fill = palette.card_background;
    visuals.panel_fill = palette.app_background;
    visuals.extreme_bg_color = palette.nav_background;
    visuals.faint_bg_color = palette.row_background;
    visuals.hyperlink_color = palette.accent;
    visuals.selection.bg_fill = palette.accent;
    visuals.window_stroke = egui::Stroke::new(1.0, palette.card_stroke);

    visuals.widgets.noninteractive.bg_fill = palette.card_background;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.card_stroke);
    visuals.widgets.inactive.bg_fill = palette.row_background;
    visuals.widgets.inactive.weak_bg_fill = palette.row_background;
    visuals.widgets.hovered.bg_fill = palette.accent_hover;
    visuals.widgets.hovered.weak_bg_fill = palette.row_hover;
    visuals.widgets.active.bg_fill = palette.accent;
    visuals.widgets.active.weak_bg_fill = lighten_color(palette.accent, 0.1);

    let radius = egui::CornerRadius::same(6);
    visuals.window_corner_radius = radius;
    visuals.menu_corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;

    visuals
}

pub fn text_styles() -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(24.0, egui::FontFamily::Proportional),
    );
    styles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_color_moves_toward_white_and_keeps_alpha() {
        let base = egui::Color32::from_rgba_unmultiplied(100, 0, 200, 255);
        assert_eq!(lighten_color(base, 0.0), base);
        assert_eq!(
            lighten_color(base, 1.0),
            egui::Color32::from_rgba_unmultiplied(255, 255, 255, 255)
        );
        assert_eq!(
            lighten_color(base, 0.5),
            egui::Color32::from_rgba_unmultiplied(178, 128, 228, 255)
        );
    }
}
