use crate::services::theme::{Theme, ThemeView};
use eframe::egui::{self, Color32, FontFamily, FontId, TextStyle, Visuals};

/// Default `animation_time` restored once transitions are allowed again.
const ANIMATION_TIME: f32 = 1.0 / 12.0;

pub fn apply_theme(ctx: &egui::Context, view: &ThemeView, transitions_enabled: bool) {
    let dark_mode = view.root_theme.is_dark();
    let accent = if dark_mode {
        Color32::from_rgb(240, 90, 80)
    } else {
        Color32::from_rgb(199, 34, 26)
    };

    ctx.set_theme(match view.root_theme {
        Theme::Dark => egui::Theme::Dark,
        Theme::Light => egui::Theme::Light,
    });

    let mut visuals = if dark_mode {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    visuals.hyperlink_color = accent;
    visuals.selection.bg_fill = accent.linear_multiply(if dark_mode { 0.65 } else { 0.8 });
    visuals.selection.stroke.color = accent;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.animation_time = if transitions_enabled { ANIMATION_TIME } else { 0.0 };
    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(12.0, 8.0);
    style.interaction.tooltip_delay = 0.15;

    style.text_styles.insert(
        TextStyle::Heading,
        FontId::new(26.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        TextStyle::Name("Title".into()),
        FontId::new(19.0, FontFamily::Proportional),
    );
    style
        .text_styles
        .insert(TextStyle::Body, FontId::new(15.0, FontFamily::Proportional));
    style.text_styles.insert(
        TextStyle::Button,
        FontId::new(15.0, FontFamily::Proportional),
    );
    style.text_styles.insert(
        TextStyle::Small,
        FontId::new(13.0, FontFamily::Proportional),
    );

    ctx.set_style(style);
}
