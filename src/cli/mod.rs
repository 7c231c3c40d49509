pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::domain::OrderBy;

#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(about = "Browse news stories from the content search API", long_about = None)]
pub struct Cli {
    /// Path to a config.toml (default: ~/.config/newsdesk/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Section to show, overriding the configured preference
    #[arg(short, long, global = true)]
    pub section: Option<String>,

    /// Sort order (newest, oldest, relevance), overriding the configured preference
    #[arg(short, long, global = true)]
    pub order_by: Option<OrderBy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Fetch stories once and print them
    List,
    /// Print the request URL for the current preferences
    Url,
    /// Launch the TUI
    Tui,
}

impl Cli {
    /// Apply command-line preference overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(section) = &self.section {
            config.preferences.section = section.clone();
        }
        if let Some(order_by) = &self.order_by {
            config.preferences.order_by = order_by.clone();
        }
    }

    pub fn selected_command(&self) -> Commands {
        self.command.unwrap_or(Commands::List)
    }
}
