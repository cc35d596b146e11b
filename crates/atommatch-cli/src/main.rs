mod cli;
mod commands;
mod error;
mod input;
mod logging;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("atommatch CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Commands::Match(args) => {
            info!("Dispatching to 'match' command.");
            commands::matching::run(args, &mut stdout)
        }
        Commands::Encode(args) => {
            info!("Dispatching to 'encode' command.");
            commands::encode::run(args, &mut stdout)
        }
        Commands::Inspect(args) => {
            info!("Dispatching to 'inspect' command.");
            commands::inspect::run(args, &mut stdout)
        }
    };

    if let Err(e) = &result {
        error!("Command failed: {}", e);
    }
    result
}
