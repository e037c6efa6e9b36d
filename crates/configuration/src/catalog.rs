//! The catalog file a connector is deployed with, as it is read from disk.

use std::path::Path;

use tokio::fs;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::keys::ConfigKey;
use crate::properties::{parse_properties, render_properties, Properties};
use crate::settings::ConnectorSettings;
use crate::values::PropertyValue;

pub const CONFIGURATION_FILENAME: &str = "oracle.properties";
const CONFIGURATION_HEADER: &str = "Oracle connector settings.\n\
    Values of the form ${ENV:NAME} are read from the environment variable NAME.";

/// Catalog properties before environment placeholders are resolved and values are validated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedConfiguration {
    pub properties: Properties,
}

impl ParsedConfiguration {
    /// Every key that has a default, set to that default.
    pub fn initial() -> Self {
        let properties = ConnectorSettings::default()
            .to_properties()
            .into_iter()
            .map(|(key, value)| (key.as_str().to_string(), PropertyValue::from(value)))
            .collect();
        Self { properties }
    }

    pub fn get(&self, key: ConfigKey) -> Option<&PropertyValue> {
        self.properties.get(key.as_str())
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<PropertyValue>) -> &mut Self {
        self.properties.insert(key.as_str().to_string(), value.into());
        self
    }
}

/// Parse the catalog file in a configuration directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents = fs::read_to_string(&configuration_file)
        .await
        .map_err(|source| ParseConfigurationError::IoError {
            file_path: configuration_file.clone(),
            source,
        })?;

    let properties = parse_properties(&configuration_file_contents).map_err(|error| {
        ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line,
            message: error.message,
        }
    })?;

    tracing::info!(
        file = %configuration_file.display(),
        properties = properties.len(),
        "read catalog file"
    );

    Ok(ParsedConfiguration { properties })
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: &ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    fs::write(
        &configuration_file,
        render_properties(CONFIGURATION_HEADER, &parsed_config.properties),
    )
    .await?;

    Ok(())
}
