use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod config;
mod terminal;

use commands::{
    ConfigCommand, FridgeCommand, LookupCommand, OnboardCommand, PlanCommand, ProfileCommand,
    ThemeCommand, UnplannedCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "ration")]
#[command(version)]
#[command(about = "Daily meal plan, macro tracking and fridge inventory", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and track today's meal plan
    Plan(PlanCommand),

    /// Record meals eaten outside the plan
    Unplanned(UnplannedCommand),

    /// Manage products in the fridge
    Fridge(FridgeCommand),

    /// Create a profile with personal macro targets
    Onboard(OnboardCommand),

    /// Show the stored profile
    Profile(ProfileCommand),

    /// Show or change the theme
    Theme(ThemeCommand),

    /// Query the nutrition service
    Lookup(LookupCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config commands
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    init_tracing(&config);

    execute_command(&cli.command, &config, cli_config_path)
}

/// Log to stderr so command output stays clean. RUST_LOG wins over the config.
fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.value.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn execute_command(
    command: &Option<Commands>,
    config: &Config,
    cli_config_path: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Some(Commands::Plan(cmd)) => cmd.run(config)?,
        Some(Commands::Unplanned(cmd)) => cmd.run(config)?,
        Some(Commands::Fridge(cmd)) => cmd.run(config)?,
        Some(Commands::Onboard(cmd)) => cmd.run(config)?,
        Some(Commands::Profile(cmd)) => cmd.run(config)?,
        Some(Commands::Theme(cmd)) => cmd.run(config)?,
        Some(Commands::Lookup(cmd)) => cmd.run(config)?,
        Some(Commands::Config(cmd)) => cmd.run(config, cli_config_path)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
