use clap::{Args, Subcommand};

use ration_core::{Surface, Theme};

use super::{open, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub command: ThemeSubcommand,
}

#[derive(Subcommand)]
pub enum ThemeSubcommand {
    /// Show the current theme
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Switch between dark and light
    Toggle,

    /// Set the theme
    Set {
        /// dark or light
        theme: String,
    },
}

impl ThemeCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ThemeSubcommand::Show { format } => {
                let mut app = open(config, *format);
                app.render(&[Surface::Theme]);
            }
            ThemeSubcommand::Toggle => {
                let mut app = open(config, OutputFormat::Text);
                app.toggle_theme();
            }
            ThemeSubcommand::Set { theme } => {
                let theme: Theme = theme.parse()?;
                let mut app = open(config, OutputFormat::Text);
                app.set_theme(theme);
            }
        }
        Ok(())
    }
}
