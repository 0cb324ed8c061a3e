use crate::services::catalog::{ExtensionId, ExtensionRecord};
use crate::services::filter::{Filter, FilterManager};
use crate::services::theme::{Theme, ThemeController};
use crate::ui::{render_extensions, Grid, GridEvent};

/// Everything the UI mutates: the working copy of the records and the theme.
pub struct AppState {
    extensions: Vec<ExtensionRecord>,
    theme: ThemeController,
}

impl AppState {
    /// The seed list is cloned so later toggles never touch it.
    pub fn new(seed: &[ExtensionRecord], theme: ThemeController) -> Self {
        Self {
            extensions: seed.to_vec(),
            theme,
        }
    }

    pub fn extensions(&self) -> &[ExtensionRecord] {
        &self.extensions
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub id: ExtensionId,
    pub name: String,
    pub before: bool,
    pub after: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridOutcome {
    Removed { id: ExtensionId, name: String },
    Toggled(ToggleOutcome),
}

pub struct ExtensionsController {
    state: AppState,
    filter: FilterManager,
    grid: Grid,
}

impl ExtensionsController {
    pub fn new(state: AppState, initial_filter: Filter) -> Self {
        let mut controller = Self {
            state,
            filter: FilterManager::new(initial_filter),
            grid: Grid::default(),
        };
        controller.apply_filter(None);
        controller
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_filter(&self) -> Filter {
        self.filter.current()
    }

    pub fn theme(&self) -> &ThemeController {
        &self.state.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeController {
        &mut self.state.theme
    }

    pub fn visible(&self, filter: Option<Filter>) -> Vec<(ExtensionId, &ExtensionRecord)> {
        self.filter.get(&self.state.extensions, filter)
    }

    /// Selects `filter` (or keeps the current one) and rebuilds the grid.
    pub fn apply_filter(&mut self, filter: Option<Filter>) {
        if let Some(filter) = filter {
            self.filter.set_current(filter);
        }
        let visible = self.filter.get(&self.state.extensions, None);
        render_extensions(&visible, &mut self.grid);
    }

    pub fn handle_grid_event(&mut self, event: GridEvent) -> Option<GridOutcome> {
        match event {
            GridEvent::Remove(id) => self.remove_card(id),
            GridEvent::Toggle { id, checked } => {
                self.toggle_extension(id, checked).map(GridOutcome::Toggled)
            }
        }
    }

    /// Takes the card off the grid. The record stays in state and comes back
    /// on the next full render.
    pub fn remove_card(&mut self, id: ExtensionId) -> Option<GridOutcome> {
        let name = self.grid.card(id)?.name.clone();
        self.grid.remove_card(id);
        Some(GridOutcome::Removed { id, name })
    }

    pub fn toggle_extension(&mut self, id: ExtensionId, checked: bool) -> Option<ToggleOutcome> {
        let card = self.grid.card_mut(id)?;
        card.checked = checked;
        card.data_active = checked;

        let record = self.state.extensions.get_mut(id.index())?;
        let before = record.is_active;
        log::info!(
            "[Extensions] toggle before: name={} isActive={}",
            record.name,
            record.is_active
        );
        record.is_active = checked;
        log::info!(
            "[Extensions] toggle after: name={} isActive={}",
            record.name,
            record.is_active
        );

        let outcome = ToggleOutcome {
            id,
            name: record.name.clone(),
            before,
            after: checked,
        };
        self.apply_filter(None);
        Some(outcome)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme.toggle()
    }
}
