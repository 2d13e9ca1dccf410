//! Bounce Trial entry point
//!
//! Runs a trial battery headless and prints the per-trial records as JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use bounce_trial::{Battery, SimSettings, TrialConfig};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "bounce-trial",
    version,
    about = "Run a bouncing-object trial battery and print per-trial records as JSON"
)]
struct Cli {
    #[arg(help = "Trial configuration JSON file")]
    config: PathBuf,
    #[arg(long, default_value_t = 0, help = "Battery seed")]
    seed: u64,
    #[arg(long, help = "Simulation settings JSON file (defaults when omitted)")]
    settings: Option<PathBuf>,
}

fn run(cli: &Cli) -> bounce_trial::Result<()> {
    let settings = match &cli.settings {
        Some(path) => SimSettings::load(path)?,
        None => SimSettings::default(),
    };

    let config = TrialConfig::load(&cli.config)?;
    let battery = Battery::new(config, settings, cli.seed)?;
    let records = battery.run()?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Bounce Trial starting (seed {})...", cli.seed);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
