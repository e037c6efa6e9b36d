//! Connector-wide settings and the builder that validates them.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Constraint, ValidationError, ValidationErrors};
use crate::keys::ConfigKey;
use crate::values::{Password, RoundingMode};

pub const DEFAULT_VARCHAR_MAX_SIZE: u32 = 4000;
pub const DEFAULT_TIMESTAMP_PRECISION: u8 = 6;
pub const DEFAULT_NUMBER_SCALE: u8 = 10;

pub const MIN_VARCHAR_MAX_SIZE: i64 = 4000;
pub const MAX_TIMESTAMP_PRECISION: i64 = 9;
pub const MAX_NUMBER_SCALE: i64 = 38;

/// Validated settings for the connector.
///
/// Values of this type only come out of [`ConnectorSettingsBuilder::build`] (or `default`),
/// so every bound holds. There are no setters; share it freely once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorSettings {
    synonyms_enabled: bool,
    varchar_max_size: u32,
    timestamp_default_precision: u8,
    number_default_scale: u8,
    number_rounding_mode: RoundingMode,
    tls_enabled: bool,
    keystore_path: Option<PathBuf>,
    truststore_path: Option<PathBuf>,
    keystore_password: Option<Password>,
    truststore_password: Option<Password>,
}

impl Default for ConnectorSettings {
    fn default() -> Self {
        Self {
            synonyms_enabled: false,
            varchar_max_size: DEFAULT_VARCHAR_MAX_SIZE,
            timestamp_default_precision: DEFAULT_TIMESTAMP_PRECISION,
            number_default_scale: DEFAULT_NUMBER_SCALE,
            number_rounding_mode: RoundingMode::default(),
            tls_enabled: false,
            keystore_path: None,
            truststore_path: None,
            keystore_password: None,
            truststore_password: None,
        }
    }
}

impl ConnectorSettings {
    pub fn builder() -> ConnectorSettingsBuilder {
        ConnectorSettingsBuilder::default()
    }

    /// Whether Oracle synonyms are listed alongside tables and views.
    pub fn synonyms_enabled(&self) -> bool {
        self.synonyms_enabled
    }

    /// Largest VARCHAR2 length, in characters, before a column is treated as unbounded.
    pub fn varchar_max_size(&self) -> u32 {
        self.varchar_max_size
    }

    /// Fractional-second digits assumed for TIMESTAMP columns without an explicit precision.
    pub fn timestamp_default_precision(&self) -> u8 {
        self.timestamp_default_precision
    }

    /// Scale assumed for NUMBER columns declared without one.
    pub fn number_default_scale(&self) -> u8 {
        self.number_default_scale
    }

    pub fn number_rounding_mode(&self) -> RoundingMode {
        self.number_rounding_mode
    }

    pub fn tls_enabled(&self) -> bool {
        self.tls_enabled
    }

    pub fn keystore_path(&self) -> Option<&Path> {
        self.keystore_path.as_deref()
    }

    pub fn truststore_path(&self) -> Option<&Path> {
        self.truststore_path.as_deref()
    }

    pub fn keystore_password(&self) -> Option<&str> {
        self.keystore_password.as_ref().map(Password::expose)
    }

    pub fn truststore_password(&self) -> Option<&str> {
        self.truststore_password.as_ref().map(Password::expose)
    }

    /// Render the settings back into catalog properties. Unset paths and passwords are omitted.
    pub fn to_properties(&self) -> BTreeMap<ConfigKey, String> {
        let mut properties = BTreeMap::from([
            (ConfigKey::SynonymsEnabled, self.synonyms_enabled.to_string()),
            (ConfigKey::NumberDefaultScale, self.number_default_scale.to_string()),
            (ConfigKey::NumberRoundingMode, self.number_rounding_mode.to_string()),
            (ConfigKey::VarcharMaxSize, self.varchar_max_size.to_string()),
            (ConfigKey::TimestampPrecision, self.timestamp_default_precision.to_string()),
            (ConfigKey::TlsEnabled, self.tls_enabled.to_string()),
        ]);
        let path = |path: Option<&Path>| path.map(|path| path.display().to_string());
        let optional = [
            (ConfigKey::KeystorePath, path(self.keystore_path())),
            (ConfigKey::TruststorePath, path(self.truststore_path())),
            (ConfigKey::KeystorePassword, self.keystore_password().map(str::to_string)),
            (ConfigKey::TruststorePassword, self.truststore_password().map(str::to_string)),
        ];
        properties.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|value| (key, value))),
        );
        properties
    }
}

/// Collects values for [`ConnectorSettings`] without checking them.
///
/// Setters chain on the same builder; nothing is checked until [`validate`](Self::validate)
/// or [`build`](Self::build).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSettingsBuilder {
    synonyms_enabled: bool,
    varchar_max_size: i64,
    timestamp_default_precision: i64,
    number_default_scale: i64,
    number_rounding_mode: RoundingMode,
    tls_enabled: bool,
    keystore_path: Option<PathBuf>,
    truststore_path: Option<PathBuf>,
    keystore_password: Option<Password>,
    truststore_password: Option<Password>,
}

impl Default for ConnectorSettingsBuilder {
    fn default() -> Self {
        ConnectorSettings::default().into()
    }
}

impl From<ConnectorSettings> for ConnectorSettingsBuilder {
    fn from(settings: ConnectorSettings) -> Self {
        Self {
            synonyms_enabled: settings.synonyms_enabled,
            varchar_max_size: settings.varchar_max_size.into(),
            timestamp_default_precision: settings.timestamp_default_precision.into(),
            number_default_scale: settings.number_default_scale.into(),
            number_rounding_mode: settings.number_rounding_mode,
            tls_enabled: settings.tls_enabled,
            keystore_path: settings.keystore_path,
            truststore_path: settings.truststore_path,
            keystore_password: settings.keystore_password,
            truststore_password: settings.truststore_password,
        }
    }
}

impl ConnectorSettingsBuilder {
    pub fn synonyms_enabled(&mut self, enabled: bool) -> &mut Self {
        self.synonyms_enabled = enabled;
        self
    }

    pub fn varchar_max_size(&mut self, size: i64) -> &mut Self {
        self.varchar_max_size = size;
        self
    }

    pub fn timestamp_default_precision(&mut self, precision: i64) -> &mut Self {
        self.timestamp_default_precision = precision;
        self
    }

    pub fn number_default_scale(&mut self, scale: i64) -> &mut Self {
        self.number_default_scale = scale;
        self
    }

    pub fn number_rounding_mode(&mut self, mode: RoundingMode) -> &mut Self {
        self.number_rounding_mode = mode;
        self
    }

    pub fn tls_enabled(&mut self, enabled: bool) -> &mut Self {
        self.tls_enabled = enabled;
        self
    }

    pub fn keystore_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.keystore_path = Some(path.into());
        self
    }

    pub fn truststore_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.truststore_path = Some(path.into());
        self
    }

    pub fn keystore_password(&mut self, password: impl Into<Password>) -> &mut Self {
        self.keystore_password = Some(password.into());
        self
    }

    pub fn truststore_password(&mut self, password: impl Into<Password>) -> &mut Self {
        self.truststore_password = Some(password.into());
        self
    }

    /// Check every bounded field, reporting all violations rather than the first.
    pub fn validate(&self) -> Vec<ValidationError> {
        self.checked_bounds().err().unwrap_or_default()
    }

    pub fn build(&self) -> Result<ConnectorSettings, ValidationErrors> {
        let (varchar_max_size, timestamp_default_precision, number_default_scale) =
            self.checked_bounds().map_err(ValidationErrors)?;

        Ok(ConnectorSettings {
            synonyms_enabled: self.synonyms_enabled,
            varchar_max_size,
            timestamp_default_precision,
            number_default_scale,
            number_rounding_mode: self.number_rounding_mode,
            tls_enabled: self.tls_enabled,
            keystore_path: self.keystore_path.clone(),
            truststore_path: self.truststore_path.clone(),
            keystore_password: self.keystore_password.clone(),
            truststore_password: self.truststore_password.clone(),
        })
    }

    fn checked_bounds(&self) -> Result<(u32, u8, u8), Vec<ValidationError>> {
        let varchar_max_size = bounded::<u32>(
            ConfigKey::VarcharMaxSize,
            self.varchar_max_size,
            MIN_VARCHAR_MAX_SIZE..=u32::MAX.into(),
            if self.varchar_max_size < MIN_VARCHAR_MAX_SIZE {
                Constraint::AtLeast(MIN_VARCHAR_MAX_SIZE)
            } else {
                Constraint::Between(MIN_VARCHAR_MAX_SIZE, u32::MAX.into())
            },
        );
        let timestamp_default_precision = bounded::<u8>(
            ConfigKey::TimestampPrecision,
            self.timestamp_default_precision,
            0..=MAX_TIMESTAMP_PRECISION,
            Constraint::Between(0, MAX_TIMESTAMP_PRECISION),
        );
        let number_default_scale = bounded::<u8>(
            ConfigKey::NumberDefaultScale,
            self.number_default_scale,
            0..=MAX_NUMBER_SCALE,
            Constraint::Between(0, MAX_NUMBER_SCALE),
        );

        match (varchar_max_size, timestamp_default_precision, number_default_scale) {
            (Ok(varchar), Ok(precision), Ok(scale)) => Ok((varchar, precision, scale)),
            (varchar, precision, scale) => Err([varchar.err(), precision.err(), scale.err()]
                .into_iter()
                .flatten()
                .collect()),
        }
    }
}

fn bounded<T: TryFrom<i64>>(
    key: ConfigKey,
    value: i64,
    range: RangeInclusive<i64>,
    constraint: Constraint,
) -> Result<T, ValidationError> {
    range
        .contains(&value)
        .then(|| T::try_from(value).ok())
        .flatten()
        .ok_or_else(|| ValidationError::new(key, value.to_string(), constraint))
}
