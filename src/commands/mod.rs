use clap::ValueEnum;
use std::io::{self, Write};

use ration_core::catalog::default_day_plan;
use ration_core::{Controller, FileStore, KeyValueStore};

use crate::config::Config;
use crate::terminal::TerminalPresenter;

mod config_cmd;
mod fridge;
mod lookup;
mod onboard;
mod plan;
mod profile;
mod theme;
mod unplanned;

pub use config_cmd::ConfigCommand;
pub use fridge::FridgeCommand;
pub use lookup::LookupCommand;
pub use onboard::OnboardCommand;
pub use plan::PlanCommand;
pub use profile::ProfileCommand;
pub use theme::ThemeCommand;
pub use unplanned::UnplannedCommand;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// A controller writing to a terminal presenter.
pub type Session<S, W> = Controller<S, TerminalPresenter<W>>;

pub type App = Session<FileStore, io::Stdout>;

/// Open the stored state for one command invocation.
pub fn open(config: &Config, format: OutputFormat) -> App {
    let store = FileStore::new(config.data_dir.value.clone());
    let presenter = TerminalPresenter::stdout(format);
    Controller::load(store, presenter, default_day_plan(), config.theme.value)
}

/// Turn a handler outcome into the process result. The presenter has
/// already shown the details.
pub fn finish<S: KeyValueStore, W: Write, T>(
    app: &Session<S, W>,
    outcome: Option<T>,
) -> Result<T, Box<dyn std::error::Error>> {
    match outcome {
        Some(value) if !app.presenter().failed() => Ok(value),
        _ => Err("command did not complete".into()),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use ration_core::{MemoryStore, Theme};

    pub type TestSession = Session<MemoryStore, Vec<u8>>;

    pub fn session() -> TestSession {
        let presenter = TerminalPresenter::new(Vec::new(), OutputFormat::Text);
        Controller::load(MemoryStore::new(), presenter, default_day_plan(), Theme::Light)
    }

    pub fn output(app: TestSession) -> String {
        String::from_utf8(app.into_presenter().into_inner()).unwrap()
    }
}
