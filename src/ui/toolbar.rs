use crate::services::filter::Filter;
use crate::services::theme::ThemeView;
use eframe::egui::{self, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    SelectFilter(Filter),
    ToggleTheme,
}

pub fn render_header(ui: &mut egui::Ui, title: &str, theme: &ThemeView) -> Option<ToolbarAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading(title);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let button = egui::Button::new(RichText::new(theme.icon.glyph()).size(18.0))
                .selected(theme.aria_pressed);
            if ui.add(button).on_hover_text(theme.icon_alt).clicked() {
                action = Some(ToolbarAction::ToggleTheme);
            }
        });
    });
    action
}

/// Exactly one button is highlighted: the current filter.
pub fn render_filter_bar(ui: &mut egui::Ui, current: Filter) -> Option<ToolbarAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.label(RichText::new("Extensions List").text_style(egui::TextStyle::Name("Title".into())));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            for filter in Filter::ALL.iter().rev() {
                if ui
                    .selectable_label(*filter == current, filter.label())
                    .clicked()
                {
                    action = Some(ToolbarAction::SelectFilter(*filter));
                }
            }
        });
    });
    action
}
