//! Convert the parsed catalog into the settings the connector runs with.

use crate::binding::bind;
use crate::catalog::ParsedConfiguration;
use crate::environment::Environment;
use crate::error::{MakeRuntimeConfigurationError, MissingEnvironmentVariable};
use crate::keys::ConfigKey;
use crate::settings::ConnectorSettings;
use crate::values::PropertyValue;

/// Resolve environment placeholders, then bind and validate every property.
///
/// Only recognized keys are resolved. All missing environment variables are reported
/// together; validation only runs once every placeholder has resolved.
pub fn make_runtime_configuration(
    parsed_config: &ParsedConfiguration,
    environment: impl Environment,
) -> Result<ConnectorSettings, MakeRuntimeConfigurationError> {
    let mut resolved = Vec::with_capacity(parsed_config.properties.len());
    let mut missing = Vec::new();

    for (key, value) in &parsed_config.properties {
        if ConfigKey::from_name(key).is_none() {
            tracing::debug!(key = key.as_str(), "ignoring unknown configuration key");
            continue;
        }
        match value {
            PropertyValue::Plain(value) => resolved.push((key.as_str(), value.clone())),
            PropertyValue::FromEnvironment { variable } => match environment.read(variable) {
                Ok(value) => resolved.push((key.as_str(), value)),
                Err(source) => missing.push(MissingEnvironmentVariable {
                    key: key.clone(),
                    variable: variable.clone(),
                    source,
                }),
            },
        }
    }

    if !missing.is_empty() {
        return Err(MakeRuntimeConfigurationError::MissingEnvironmentVariables(missing));
    }

    let settings = bind(resolved)?;
    tracing::debug!(?settings, "connector settings validated");
    Ok(settings)
}
