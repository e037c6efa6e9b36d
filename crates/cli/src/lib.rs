//! The CLI can do a few things. This provides a central point where those things are routed and
//! then done, making it easier to test this crate deterministically.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Subcommand;
use tokio::fs;

use ndc_oracle_configuration as configuration;
use ndc_oracle_configuration::environment::Environment;
use ndc_oracle_configuration::ConnectorSettings;

/// The various contextual bits and bobs we need to run.
pub struct Context<Env: Environment> {
    pub context_path: PathBuf,
    pub environment: Env,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a catalog file with every default setting into the context directory.
    Initialize,
    /// Check the catalog file in the context directory and print the settings it resolves to.
    Validate,
}

/// What a successful command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Initialized { file_path: PathBuf },
    Validated(ConnectorSettings),
}

/// Run a command in a given directory.
pub async fn run(command: Command, context: Context<impl Environment>) -> anyhow::Result<Outcome> {
    match command {
        Command::Initialize => initialize(&context.context_path).await,
        Command::Validate => validate(&context.context_path, context.environment).await,
    }
}

/// Initialize an empty directory with a default catalog file.
///
/// Refuses to overwrite an existing catalog file.
async fn initialize(context_path: &Path) -> anyhow::Result<Outcome> {
    let file_path = context_path.join(configuration::CONFIGURATION_FILENAME);
    if fs::try_exists(&file_path).await? {
        anyhow::bail!("{} already exists", file_path.display());
    }

    configuration::write_parsed_configuration(
        &configuration::ParsedConfiguration::initial(),
        context_path,
    )
    .await?;
    tracing::info!(file = %file_path.display(), "wrote default catalog file");

    Ok(Outcome::Initialized { file_path })
}

/// Load the catalog file and run every check the connector runs at startup.
async fn validate(context_path: &Path, environment: impl Environment) -> anyhow::Result<Outcome> {
    let file_path = context_path.join(configuration::CONFIGURATION_FILENAME);
    let parsed = configuration::parse_configuration(context_path).await?;
    let settings = configuration::make_runtime_configuration(&parsed, environment)
        .with_context(|| format!("{} is not valid", file_path.display()))?;
    Ok(Outcome::Validated(settings))
}

/// Render an outcome for the terminal.
pub fn render(outcome: &Outcome) -> anyhow::Result<String> {
    match outcome {
        Outcome::Initialized { file_path } => Ok(format!("wrote {}", file_path.display())),
        Outcome::Validated(settings) => Ok(serde_json::to_string_pretty(settings)?),
    }
}
