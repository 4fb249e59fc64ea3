//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config};
use crate::error::SmartError;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suggestion endpoint URL (overrides [endpoint] url)
    #[arg(long)]
    pub url: Option<String>,

    /// Config file [default: ~/.config/smart-textarea/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Show suggestions inline, selected after the caret
    #[arg(long, conflicts_with = "overlay")]
    pub inline: bool,

    /// Show suggestions in a floating overlay
    #[arg(long)]
    pub overlay: bool,

    /// Idle time before a suggestion is requested
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> Result<Config, SmartError> {
        let config = match &self.config {
            Some(path) => config::load_config_from_path(path)?,
            None => config::load_config()?,
        };
        Ok(self.apply(config))
    }

    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(url) = &self.url {
            config.endpoint.url = Some(url.clone());
        }
        if self.inline {
            config.suggestions.inline = Some(true);
        } else if self.overlay {
            config.suggestions.inline = Some(false);
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.suggestions.debounce_ms = debounce_ms;
        }
        config
    }
}
