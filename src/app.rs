use crate::config::AppConfig;
use crate::services::catalog::ExtensionRecord;
use crate::services::theme::{Theme, ThemeController};
use crate::state::{AppState, ExtensionsController, GridOutcome};
use crate::ui::{apply_theme, render_filter_bar, render_header, show_grid, ToolbarAction};
use anyhow::{anyhow, Result};
use eframe::{egui, App, CreationContext, NativeOptions};
use std::time::{Duration, SystemTime};

pub fn run(config: AppConfig, seed: Vec<ExtensionRecord>) -> Result<()> {
    let app_name = config.application_name.clone();
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&app_name)
            .with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        &app_name,
        native_options,
        Box::new(move |cc| Ok(Box::new(ExtensionsApp::new(cc, config, &seed)))),
    )
    .map_err(|err| anyhow!(err.to_string()))
}

struct ExtensionsApp {
    config: AppConfig,
    controller: ExtensionsController,
    applied_theme: Option<(Theme, bool)>,
    status_message: Option<String>,
    event_log: EventLog,
}

impl ExtensionsApp {
    fn new(cc: &CreationContext<'_>, config: AppConfig, seed: &[ExtensionRecord]) -> Self {
        let os_prefers_dark = cc
            .egui_ctx
            .system_theme()
            .map(|theme| theme == egui::Theme::Dark);
        let theme = ThemeController::new(
            config.open_store(),
            config.theme_storage_key.clone(),
            os_prefers_dark,
        );
        let initial_filter = config.initial_filter();
        let controller = ExtensionsController::new(AppState::new(seed, theme), initial_filter);

        let mut app = Self {
            config,
            controller,
            applied_theme: None,
            status_message: None,
            event_log: EventLog::default(),
        };
        let theme = app.controller.theme().theme();
        app.push_log(
            LogLevel::Info,
            format!(
                "Loaded {} extensions (filter: {initial_filter}, theme: {theme})",
                seed.len()
            ),
        );
        app
    }

    fn push_log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.event_log.push(level, message);
    }

    fn render_logs(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Event log")
            .default_open(false)
            .show(ui, |ui| {
                if self.event_log.is_empty() {
                    ui.colored_label(egui::Color32::GRAY, "No events captured yet.");
                    return;
                }

                for entry in self.event_log.newest_first() {
                    let color = match entry.level {
                        LogLevel::Info => ui.visuals().weak_text_color(),
                        LogLevel::Warn => ui.visuals().warn_fg_color,
                    };
                    ui.colored_label(
                        color,
                        format!("[{} ago] {}", entry.age_display(), entry.message),
                    );
                }
            });
    }

    fn sync_theme(&mut self, ctx: &egui::Context) {
        let theme = self.controller.theme();
        let wanted = (theme.theme(), theme.transitions_enabled());
        if self.applied_theme != Some(wanted) {
            apply_theme(ctx, theme.view(), wanted.1);
            self.applied_theme = Some(wanted);
        }
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::SelectFilter(filter) => {
                self.controller.apply_filter(Some(filter));
                let shown = self.controller.grid().cards().len();
                self.status_message = Some(format!("Showing {shown} {filter} extensions"));
                self.push_log(LogLevel::Info, format!("Filter set to {filter}"));
            }
            ToolbarAction::ToggleTheme => {
                let theme = self.controller.toggle_theme();
                self.status_message = Some(format!("Switched to {theme} theme"));
                if self.config.persist_theme
                    && self.controller.theme().stored_theme() != Some(theme)
                {
                    self.push_log(
                        LogLevel::Warn,
                        format!("Switched to {theme} theme; preference not saved"),
                    );
                } else {
                    self.push_log(LogLevel::Info, format!("Switched to {theme} theme"));
                }
            }
        }
    }

    fn handle_outcome(&mut self, outcome: GridOutcome) {
        let message = match outcome {
            GridOutcome::Removed { name, .. } => format!("Removed {name} from the list"),
            GridOutcome::Toggled(toggle) => {
                let state = if toggle.after { "enabled" } else { "disabled" };
                if toggle.before == toggle.after {
                    format!("{} already {state}", toggle.name)
                } else {
                    format!("{} {state}", toggle.name)
                }
            }
        };
        self.status_message = Some(message.clone());
        self.push_log(LogLevel::Info, message);
    }
}

impl App for ExtensionsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_theme(ctx);
        let theme = self.controller.theme_mut();
        if !theme.transitions_enabled() {
            theme.on_frame();
            ctx.request_repaint();
        }

        let mut toolbar_action = None;
        let mut grid_event = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            toolbar_action = render_header(
                ui,
                &self.config.application_name,
                self.controller.theme().view(),
            );
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = self.status_message.as_deref().unwrap_or("Ready");
                ui.small(status);
                let removed = self.controller.grid().removed().len();
                if removed > 0 {
                    ui.separator();
                    ui.small(format!(
                        "{removed} hidden from view; choosing a filter brings them back"
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(action) = render_filter_bar(ui, self.controller.current_filter()) {
                toolbar_action = Some(action);
            }
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                grid_event = show_grid(ui, self.controller.grid());
                ui.add_space(12.0);
                ui.separator();
                self.render_logs(ui);
            });
        });

        if let Some(action) = toolbar_action {
            self.handle_toolbar(action);
            ctx.request_repaint();
        }
        if let Some(event) = grid_event {
            match self.controller.handle_grid_event(event) {
                Some(outcome) => self.handle_outcome(outcome),
                None => self.push_log(LogLevel::Warn, format!("Ignored stale card event {event:?}")),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LogLevel {
    Info,
    Warn,
}

const MAX_LOG_ENTRIES: usize = 200;

/// Bounded history of handled interactions; the oldest entries fall off.
#[derive(Default)]
struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry::new(level, message.into()));
        if self.entries.len() > MAX_LOG_ENTRIES {
            let surplus = self.entries.len() - MAX_LOG_ENTRIES;
            self.entries.drain(0..surplus);
        }
    }

    fn newest_first(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().rev()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct LogEntry {
    timestamp: SystemTime,
    level: LogLevel,
    message: String,
}

impl LogEntry {
    fn new(level: LogLevel, message: String) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            message,
        }
    }

    fn age_display(&self) -> String {
        match SystemTime::now().duration_since(self.timestamp) {
            Ok(duration) => format_age(duration),
            Err(_) => "now".into(),
        }
    }
}

fn format_age(duration: Duration) -> String {
    if duration < Duration::from_secs(60) {
        format!("{:.0}s", duration.as_secs_f32())
    } else if duration < Duration::from_secs(3600) {
        format!("{:.1}m", duration.as_secs_f64() / 60.0)
    } else {
        format!("{:.1}h", duration.as_secs_f64() / 3600.0)
    }
}
