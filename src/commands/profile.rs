use clap::Args;

use super::{open, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ProfileCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ProfileCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let app = open(config, self.format);
        let Some(profile) = app.state().profile() else {
            println!("No profile yet. Run 'ration onboard' to create one.");
            return Ok(());
        };

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(profile)?),
            OutputFormat::Text => print!("{}", profile),
        }
        Ok(())
    }
}
