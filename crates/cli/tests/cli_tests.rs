use std::collections::HashMap;
use std::path::Path;

use similar_asserts::assert_eq;

use ndc_oracle_cli::{render, run, Command, Context, Outcome};
use ndc_oracle_configuration::environment::{EmptyEnvironment, Variable};
use ndc_oracle_configuration::{ConnectorSettings, RoundingMode, CONFIGURATION_FILENAME};

#[tokio::test]
async fn initialize_writes_a_valid_catalog() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };

    let outcome = run(Command::Initialize, context).await?;
    let file_path = dir.path().join(CONFIGURATION_FILENAME);
    assert_eq!(outcome, Outcome::Initialized { file_path: file_path.clone() });
    assert!(file_path.is_file());

    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };
    let outcome = run(Command::Validate, context).await?;
    assert_eq!(outcome, Outcome::Validated(ConnectorSettings::default()));

    Ok(())
}

#[tokio::test]
async fn initialize_does_not_overwrite() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let file_path = dir.path().join(CONFIGURATION_FILENAME);
    std::fs::write(&file_path, "oracle.number.default-scale=2\n")?;

    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };
    let error = run(Command::Initialize, context).await.unwrap_err();
    assert!(error.to_string().ends_with("already exists"));
    assert_eq!(
        std::fs::read_to_string(&file_path)?,
        "oracle.number.default-scale=2\n"
    );

    Ok(())
}

#[tokio::test]
async fn validate_resolves_placeholders() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join(CONFIGURATION_FILENAME),
        "connector.name=oracle\n\
         oracle.number.rounding-mode=HALF_EVEN\n\
         oracle.tls.enabled=true\n\
         oracle.tls.truststore-path=/etc/ts.p12\n\
         oracle.tls.truststore-password=${ENV:TRUSTSTORE_PASSWORD}\n",
    )?;

    let context = Context {
        context_path: dir.path().to_owned(),
        environment: HashMap::from([(
            Variable::from("TRUSTSTORE_PASSWORD"),
            "changeit".to_string(),
        )]),
    };
    let Outcome::Validated(settings) = run(Command::Validate, context).await? else {
        panic!("expected validated settings");
    };

    assert_eq!(settings.number_rounding_mode(), RoundingMode::HalfEven);
    assert!(settings.tls_enabled());
    assert_eq!(settings.truststore_path(), Some(Path::new("/etc/ts.p12")));
    assert_eq!(settings.truststore_password(), Some("changeit"));

    let rendered = render(&Outcome::Validated(settings))?;
    assert!(rendered.contains("\"truststorePassword\": \"<redacted>\""));
    assert!(!rendered.contains("changeit"));

    Ok(())
}

#[tokio::test]
async fn validate_reports_every_violation() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(
        dir.path().join(CONFIGURATION_FILENAME),
        "oracle.number.default-scale=39\n\
         oracle.number.rounding-mode=SIDEWAYS\n\
         oracle.timestamp.precision=-1\n",
    )?;

    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };
    let error = run(Command::Validate, context).await.unwrap_err();
    let message = format!("{error:#}");

    assert!(message.contains("is not valid"));
    assert!(message.contains("'oracle.number.default-scale'"));
    assert!(message.contains("'oracle.number.rounding-mode'"));
    assert!(message.contains("'oracle.timestamp.precision'"));

    Ok(())
}

#[tokio::test]
async fn validate_without_a_catalog_fails() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };
    assert!(run(Command::Validate, context).await.is_err());
    Ok(())
}
