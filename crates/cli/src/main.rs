//! The entrypoint for our connector CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ndc_oracle_cli::{render, run, Command, Context};
use ndc_oracle_configuration::environment::ProcessEnvironment;

/// The release version specified at build time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The command-line arguments.
#[derive(Debug, Parser)]
#[command(version = VERSION)]
pub struct Args {
    /// The path to the configuration directory.
    #[arg(long = "context-path", env = "HASURA_CONFIGURATION_DIRECTORY", value_name = "PATH")]
    pub context_path: Option<PathBuf>,
    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

/// The application entrypoint. It pulls information from the environment and then calls the
/// [run] function. The library remains unaware of the environment, so that we can more easily
/// test it.
#[tokio::main]
pub async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("unable to install the log subscriber: {error}");
        return ExitCode::FAILURE;
    }

    let args = Args::parse();
    let context_path = match args.context_path {
        Some(path) => path,
        None => match std::env::current_dir() {
            Ok(path) => path,
            Err(error) => {
                eprintln!("unable to read the current directory: {error}");
                return ExitCode::FAILURE;
            }
        },
    };
    let context = Context {
        context_path,
        environment: ProcessEnvironment,
    };

    match run(args.subcommand, context).await.and_then(|outcome| render(&outcome)) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
