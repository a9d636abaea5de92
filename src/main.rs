mod chart;
mod config;
mod consts;
mod dashboard;
mod events;
mod logging;
mod pretty;
mod session;

use crate::chart::ChartName;
use crate::chart::options::OptionComposer;
use crate::config::{DashboardConfig, get_config_path};
use crate::pretty::{print_cmd_error, print_cmd_info};
use crate::session::{PageOutput, run_headless_mode, setup_session};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured backend URL.
const URL_ENV_VAR: &str = "PROFIT_DASHBOARD_URL";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch chart data and render the betting-profit dashboard
    Run {
        /// Backend base URL, e.g. http://localhost:8000
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Config file to use instead of ~/.profit-dashboard/config.json
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Seconds between automatic refreshes
        #[arg(long, value_name = "SECS")]
        refresh_secs: Option<u64>,

        /// Render once and exit
        #[arg(long)]
        once: bool,

        /// Write the rendered page to this file
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the composed configuration of a chart for an empty dataset
    Options {
        /// Chart to print
        #[arg(long, value_name = "CHART", default_value = "profit-evolution")]
        chart: ChartName,
    },
    /// Write a default config file
    InitConfig {
        /// Where to write it instead of ~/.profit-dashboard/config.json
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Backend base URL to store
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init_logger();

    let args = Args::parse();
    match args.command {
        Command::Run {
            base_url,
            config,
            refresh_secs,
            once,
            output,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Ok(url) = std::env::var(URL_ENV_VAR) {
                if !url.is_empty() {
                    config.base_url = url;
                }
            }
            if let Some(url) = base_url {
                config.base_url = url;
            }
            if let Some(secs) = refresh_secs {
                config.refresh_interval_secs = secs;
            }

            let output = match output {
                Some(path) => PageOutput::File(path),
                None if once => PageOutput::Stdout,
                None => PageOutput::None,
            };

            let session = setup_session(&config, output, once)?;
            run_headless_mode(session).await
        }
        Command::Options { chart } => {
            let kind = chart.kind();
            let empty = kind.extract(&json!({}))?;
            let options = OptionComposer::default().compose(&kind.specific_options(&empty));
            println!("{}", serde_json::to_string_pretty(&options)?);
            Ok(())
        }
        Command::InitConfig {
            config,
            base_url,
            force,
        } => {
            let path = match config {
                Some(path) => path,
                None => get_config_path()?,
            };
            if path.exists() && !force {
                print_cmd_error!(
                    "Config already exists",
                    "{} (use --force to overwrite)",
                    path.display()
                );
                return Err(format!("{} already exists", path.display()).into());
            }

            let mut dashboard_config = DashboardConfig::default();
            if let Some(url) = base_url {
                dashboard_config.base_url = url;
            }
            dashboard_config.save(&path)?;
            print_cmd_info!("Config", "Wrote {}", path.display());
            Ok(())
        }
    }
}

/// Load the explicit config file, or the default one if it exists.
fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig, Box<dyn Error>> {
    if let Some(path) = explicit {
        return DashboardConfig::load_from_file(path).map_err(|e| {
            print_cmd_error!(
                "Failed to load config",
                "{}: {}",
                path.display(),
                e
            );
            format!("Failed to load config {}: {}", path.display(), e).into()
        });
    }

    let default_path = get_config_path()?;
    if default_path.exists() {
        match DashboardConfig::load_from_file(&default_path) {
            Ok(config) => {
                print_cmd_info!("Config", "Loaded {}", default_path.display());
                return Ok(config);
            }
            Err(e) => {
                print_cmd_error!("Ignoring unreadable default config");
                log::warn!("{}: {}", default_path.display(), e);
            }
        }
    }
    Ok(DashboardConfig::default())
}
