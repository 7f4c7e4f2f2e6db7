//! Sens'it CLI - read devices and sensor history from the terminal.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use sensit_core::config::AppConfig;
use sensit_core::error::SensitResult;
use sensit_core::logging;
use sensit_core::platform::Platform;
use sensit_models::SensorKind;

/// Sens'it - telemetry from Sens'it sensor devices.
#[derive(Parser)]
#[command(
    name = "sensit",
    version,
    about = "Sens'it sensor client",
    long_about = "Read devices and sensor history (temperature, sound, motion, button)\n\
                  from the Sens'it cloud API."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// API token (overrides SENSIT_TOKEN and the stored token).
    #[arg(long, global = true)]
    token: Option<String>,

    /// Account e-mail for the password exchange.
    #[arg(long, global = true)]
    email: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Exchange e-mail and password for an API token.
    Login {
        /// Store the token and e-mail in the config file.
        #[arg(long)]
        save: bool,
    },
    /// List devices with their sensors and mode.
    Devices,
    /// Show the history of one sensor.
    ///
    /// Paging follows `[history] page_order` in the config file. The hosted
    /// Sens'it API serves newest records first: set `page_order = "newest_first"`
    /// when using it, or `--last` combined with `--begin`/`--end` selects
    /// the wrong end of the window.
    History {
        /// Sensor kind: temperature, sound, motion or button.
        kind: SensorKind,
        /// Device id (defaults to the first device).
        #[arg(short, long)]
        device: Option<String>,
        /// Number of records.
        #[arg(short = 'n', long)]
        last: Option<usize>,
        /// Exclusive lower bound: a timestamp, or `device` for the activation date.
        #[arg(short, long)]
        begin: Option<String>,
        /// Exclusive upper bound: a timestamp, or `device` for the last communication.
        #[arg(short, long)]
        end: Option<String>,
    },
}

/// Global options every command needs.
pub struct Context {
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    pub token: Option<String>,
    pub email: Option<String>,
}

#[tokio::main]
async fn main() -> SensitResult<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => AppConfig::default_config_path()?,
    };
    let config = if config_path.exists() {
        AppConfig::load_from_file(&config_path)?
    } else {
        AppConfig::default()
    };

    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(log_level, &log_dir, config.logging.json_output)?;

    info!(
        "Sens'it CLI v{} on {}",
        sensit_core::constants::APP_VERSION,
        Platform::current()
    );

    let ctx = Context {
        config,
        config_path,
        format: cli.format,
        token: cli.token,
        email: cli.email,
    };

    match cli.command {
        Commands::Login { save } => commands::login::run(ctx, save).await,
        Commands::Devices => commands::devices::run(ctx).await,
        Commands::History { kind, device, last, begin, end } => {
            let args = commands::history::HistoryArgs { kind, device, last, begin, end };
            commands::history::run(ctx, args).await
        }
    }
}
