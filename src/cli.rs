// src/cli.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use popmenu::popup::{PositionClass, Resources};
use std::path::PathBuf;

use crate::config::Config;

/// popmenu: dropdown popup menu demo for the terminal
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the popmenu configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Set log level (RUST_LOG takes precedence)
    #[clap(long, value_name = "LEVEL", value_enum)]
    pub log_level: Option<LogLevelCli>,

    /// Do not dim the screen behind the popup
    #[clap(long)]
    pub no_dim: bool,

    /// Hide item icons
    #[clap(long)]
    pub no_icons: bool,

    /// Show the popup without the reveal animation
    #[clap(long)]
    pub no_animation: bool,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the configured menu rows and exit
    Items,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevelCli {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevelCli {
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Cli {
    /// Command line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if self.no_dim {
            config.popup.background_dark = false;
        }
        if self.no_icons {
            config.popup.show_icon = false;
        }
        if self.no_animation {
            config.popup.show_animation = false;
        }
        if let Some(level) = self.log_level {
            config.logging.level = level.as_filter().to_string();
        }
    }
}

pub fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Items => {
            for line in item_lines(config) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// One line per bound row, as the popup would lay them out.
pub fn item_lines(config: &Config) -> Vec<String> {
    let mut menu = config.popup.to_menu().add_menu_items(config.items.iter().cloned());
    let adapter = &menu.build().adapter;
    adapter
        .bind_all()
        .map(|row| {
            let class = match row.class {
                PositionClass::Top => "top",
                PositionClass::Middle => "middle",
                PositionClass::Bottom => "bottom",
            };
            let icon = row
                .icon
                .and_then(|id| config.resources.icon(id))
                .unwrap_or(" ");
            let label = config.resources.text(row.label).unwrap_or("");
            format!("{:>2} {:<6} {} {}", row.position, class, icon, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_subcommand() {
        let cli = Cli::parse_from(["popmenu", "--no-dim", "--log-level", "debug", "items"]);
        assert!(cli.no_dim);
        assert_eq!(cli.log_level, Some(LogLevelCli::Debug));
        assert!(matches!(cli.command, Some(Commands::Items)));
    }

    #[test]
    fn overrides_apply_to_config() {
        let cli = Cli::parse_from(["popmenu", "--no-icons", "--no-animation", "--log-level", "trace"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(!config.popup.show_icon);
        assert!(!config.popup.show_animation);
        assert!(config.popup.background_dark);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn item_lines_follow_position_classes() {
        let lines = item_lines(&Config::default());
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], " 0 top    ↻ Refresh");
        assert_eq!(lines[2], " 2 middle   Reopen menu");
        assert_eq!(lines[4], " 4 bottom ⏻ Quit");
    }

    #[test]
    fn item_lines_hide_icons_when_disabled() {
        let mut config = Config::default();
        config.popup.show_icon = false;
        assert_eq!(item_lines(&config)[0], " 0 top      Refresh");
    }
}
