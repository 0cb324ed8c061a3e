mod grid;
mod theme;
mod toolbar;

pub use grid::{render_extensions, show as show_grid, Grid, GridEvent};
pub use theme::apply_theme;
pub use toolbar::{render_filter_bar, render_header, ToolbarAction};
