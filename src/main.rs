mod app;
mod cli;
mod config;
mod services;
mod state;
mod ui;

use crate::cli::{Command, ThemeAction};
use crate::config::AppConfig;
use crate::services::catalog::{self, ExtensionRecord};
use crate::services::filter::{Filter, FilterManager};
use crate::services::theme::{read_stored_theme, resolve_initial_theme, Theme, ThemeController};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::panic;

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        eprintln!("extension-manager panic: {info}");
        if let Some(location) = info.location() {
            eprintln!(
                "  at {}:{}",
                location.file(),
                location.line()
            );
        }
    }));

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    let settings = AppConfig::load(&cli)?;

    if let Some(command) = cli.command.clone() {
        return handle_command(command, &settings);
    }

    let seed = load_seed(&settings)?;

    if cli.headless {
        print_extensions(&seed, settings.initial_filter());
        return Ok(());
    }

    app::run(settings, seed)
}

fn handle_command(command: Command, settings: &AppConfig) -> Result<()> {
    match command {
        Command::List { filter } => {
            let seed = load_seed(settings)?;
            let filter = filter.map(Filter::from).unwrap_or_else(|| settings.initial_filter());
            print_extensions(&seed, filter);
        }
        Command::Theme { action } => handle_theme(action, settings)?,
    }
    Ok(())
}

fn handle_theme(action: ThemeAction, settings: &AppConfig) -> Result<()> {
    let key = settings.theme_storage_key.as_str();
    let open_controller = || ThemeController::new(settings.open_store(), key, None);

    match action {
        ThemeAction::Show => {
            let store = settings.open_store();
            let stored = read_stored_theme(store.as_ref(), key);
            let theme = resolve_initial_theme(store.as_ref(), key, None);
            let origin = if stored.is_some() { "stored" } else { "default" };
            println!("{theme} ({origin})");
            Ok(())
        }
        ThemeAction::Set { theme } => {
            let mut controller = open_controller();
            let theme = Theme::from(theme);
            controller.apply_theme(theme);
            confirm_saved(&controller, theme)
        }
        ThemeAction::Toggle => {
            let mut controller = open_controller();
            let theme = controller.toggle();
            confirm_saved(&controller, theme)
        }
        ThemeAction::Reset => {
            let theme = open_controller().reset(None);
            println!("Stored theme cleared; UI will follow the OS ({theme} when unknown)");
            Ok(())
        }
    }
}

fn confirm_saved(controller: &ThemeController, theme: Theme) -> Result<()> {
    if controller.stored_theme() != Some(theme) {
        bail!("theme {theme} could not be saved; storage is unavailable");
    }
    println!("Theme set to {theme}");
    Ok(())
}

fn load_seed(settings: &AppConfig) -> Result<Vec<ExtensionRecord>> {
    catalog::load_seed(settings.seed_path.as_deref()).context("failed to load extensions")
}

fn print_extensions(seed: &[ExtensionRecord], filter: Filter) {
    let manager = FilterManager::new(filter);
    let visible = manager.get(seed, None);
    println!("{} extensions ({filter}):", visible.len());
    for (id, record) in visible {
        let id = id.to_string();
        let mark = if record.is_active { "x" } else { " " };
        println!("  [{mark}] {id:<7} {} - {}", record.name, record.description);
    }
}
