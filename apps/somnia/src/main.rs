//! Somnia binary entry point.

use clap::Parser;
use somnia::cli::{Cli, CliError, Commands, cmd_classify, cmd_monitor, cmd_stages};
use std::io;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "somnia=debug" } else { "somnia=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Monitor {
            interval_ms,
            ticks,
            seed,
            output,
        } => {
            cmd_monitor(io::stdout(), interval_ms, ticks, seed, output.renderer()).await?;
        }
        Commands::Classify {
            motion,
            noise,
            output,
        } => {
            cmd_classify(
                &mut io::stdout(),
                motion,
                noise,
                output.json,
                output.locale.into(),
            )?;
        }
        Commands::Stages { output } => {
            cmd_stages(&mut io::stdout(), output.renderer())?;
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
