use crate::services::filter::Filter;
use crate::services::theme::Theme;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line interface for the extension manager.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "extension-manager",
    author,
    version,
    about = "Browse, toggle and theme your browser extensions"
)]
pub struct Cli {
    /// Optional path to a configuration file (TOML, YAML, JSON).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Named profile to load (e.g. work, personal).
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// JSON file with the extension list to start from.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Never read or write the stored theme.
    #[arg(long, global = true)]
    pub no_persist: bool,

    /// Print the extension list instead of opening the UI.
    #[arg(long)]
    pub headless: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the extensions matching a filter.
    List {
        #[arg(short, long, value_enum)]
        filter: Option<FilterArg>,
    },
    /// Inspect or change the stored light/dark theme.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ThemeAction {
    /// Print the theme the UI would start with.
    Show,
    /// Store a theme.
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
    /// Flip the stored theme.
    Toggle,
    /// Forget the stored theme and follow the OS again.
    Reset,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    Active,
    Inactive,
}

impl From<FilterArg> for Filter {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => Filter::All,
            FilterArg::Active => Filter::Active,
            FilterArg::Inactive => Filter::Inactive,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_accepts_filter() {
        let cli = Cli::parse_from(["extension-manager", "list", "--filter", "inactive"]);
        match cli.command {
            Some(Command::List { filter: Some(filter) }) => {
                assert_eq!(Filter::from(filter), Filter::Inactive)
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn theme_set_parses_value() {
        let cli = Cli::parse_from(["extension-manager", "--no-persist", "theme", "set", "dark"]);
        assert!(cli.no_persist);
        match cli.command {
            Some(Command::Theme {
                action: ThemeAction::Set { theme },
            }) => assert_eq!(Theme::from(theme), Theme::Dark),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["extension-manager", "list", "--filter", "enabled"]).is_err());
    }
}
