use crate::services::catalog::{ExtensionId, ExtensionRecord};
use eframe::egui::{self, Color32, RichText, Stroke};

const CARD_WIDTH: f32 = 320.0;

/// View model for one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCard {
    pub id: ExtensionId,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub logo_alt: String,
    pub checked: bool,
    /// Styling marker only; logic reads `checked`.
    pub data_active: bool,
}

impl ExtensionCard {
    fn initials(&self) -> String {
        let mut initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect();
        if initials.is_empty() {
            initials.push('?');
        }
        initials.to_uppercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridEvent {
    Remove(ExtensionId),
    Toggle { id: ExtensionId, checked: bool },
}

/// Cards currently on screen. Removals only touch this view; the ids of
/// removed cards are kept until the next full render.
#[derive(Debug, Default)]
pub struct Grid {
    cards: Vec<ExtensionCard>,
    removed: Vec<ExtensionId>,
}

impl Grid {
    pub fn cards(&self) -> &[ExtensionCard] {
        &self.cards
    }

    pub fn removed(&self) -> &[ExtensionId] {
        &self.removed
    }

    pub fn card(&self, id: ExtensionId) -> Option<&ExtensionCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn card_mut(&mut self, id: ExtensionId) -> Option<&mut ExtensionCard> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn remove_card(&mut self, id: ExtensionId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        let removed = self.cards.len() != before;
        if removed {
            self.removed.push(id);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.removed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

pub fn create_extension_card(id: ExtensionId, record: &ExtensionRecord) -> ExtensionCard {
    ExtensionCard {
        id,
        name: record.name.clone(),
        description: record.description.clone(),
        logo: record.logo.clone(),
        logo_alt: format!("{} logo", record.name),
        checked: record.is_active,
        data_active: record.is_active,
    }
}

/// Replaces the grid contents with one card per record, in order.
pub fn render_extensions(records: &[(ExtensionId, &ExtensionRecord)], grid: &mut Grid) {
    grid.clear();
    grid.cards.extend(
        records
            .iter()
            .map(|(id, record)| create_extension_card(*id, record)),
    );
}

pub fn show(ui: &mut egui::Ui, grid: &Grid) -> Option<GridEvent> {
    if grid.is_empty() {
        ui.colored_label(Color32::GRAY, "No extensions to show");
        return None;
    }

    let columns = ((ui.available_width() / (CARD_WIDTH + 16.0)).floor() as usize).max(1);
    let mut event = None;

    egui::Grid::new("extensions_grid")
        .num_columns(columns)
        .spacing(egui::vec2(16.0, 16.0))
        .show(ui, |ui| {
            for (index, card) in grid.cards().iter().enumerate() {
                if let Some(card_event) = show_card(ui, card) {
                    event = Some(card_event);
                }
                if (index + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });

    event
}

fn show_card(ui: &mut egui::Ui, card: &ExtensionCard) -> Option<GridEvent> {
    let accent = ui.visuals().selection.stroke.color;
    let stroke = if card.data_active {
        Stroke::new(1.5, accent)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    let mut event = None;
    egui::Frame::group(ui.style())
        .stroke(stroke)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.push_id(card.id.index(), |ui| {
                ui.horizontal(|ui| {
                    egui::Frame::new()
                        .fill(accent.linear_multiply(0.8))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(card.initials()).strong().color(Color32::WHITE));
                        })
                        .response
                        .on_hover_text(format!("{} ({})", card.logo_alt, card.logo));

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&card.name)
                                .text_style(egui::TextStyle::Name("Title".into()))
                                .strong(),
                        );
                        ui.add(egui::Label::new(card.description.as_str()).wrap());
                    });
                });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Remove").clicked() {
                        event = Some(GridEvent::Remove(card.id));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut checked = card.checked;
                        if ui
                            .add(egui::Checkbox::without_text(&mut checked))
                            .on_hover_text("Toggle extension")
                            .changed()
                        {
                            event = Some(GridEvent::Toggle {
                                id: card.id,
                                checked,
                            });
                        }
                    });
                });
            });
        });

    event
}
