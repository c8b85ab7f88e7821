use clap::Args;

use ration_core::http::ResponseBody;

use super::{finish, open, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct LookupCommand {
    /// Product or dish to look up
    pub query: String,

    /// Override the configured nutrition API URL
    #[arg(long)]
    pub url: Option<String>,
}

impl LookupCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let base_url = self
            .url
            .clone()
            .or_else(|| config.nutrition_api_url.value.clone())
            .ok_or("No nutrition API configured. Set nutrition_api_url in the config file.")?;

        let mut app = open(config, OutputFormat::Text);
        let rt = tokio::runtime::Runtime::new()?;
        let body = rt.block_on(app.lookup(&base_url, &self.query));
        let body = finish(&app, body)?;

        match body {
            ResponseBody::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            ResponseBody::Text(text) => println!("{}", text),
        }
        Ok(())
    }
}
