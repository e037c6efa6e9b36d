//! Bind string-keyed configuration values onto [`ConnectorSettings`].

use std::collections::BTreeMap;

use crate::error::{Constraint, ValidationError, ValidationErrors};
use crate::keys::ConfigKey;
use crate::settings::{ConnectorSettings, ConnectorSettingsBuilder};
use crate::values::{RoundingMode, ROUNDING_MODE_NAMES};

/// Build validated settings from `(key, raw value)` pairs.
///
/// Keys that are not recognized are ignored, and keys that are absent keep their defaults. A
/// repeated key takes its last value. Either every value converts and satisfies its bounds, or
/// every violation is returned together, ordered by key.
pub fn bind<K, V>(
    properties: impl IntoIterator<Item = (K, V)>,
) -> Result<ConnectorSettings, ValidationErrors>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut values = BTreeMap::new();
    for (name, value) in properties {
        let name = name.as_ref();
        let Some(key) = ConfigKey::from_name(name) else {
            tracing::debug!(key = name, "ignoring unknown configuration key");
            continue;
        };
        values.insert(key, value);
    }

    let mut builder = ConnectorSettings::builder();
    let mut errors = Vec::new();
    for (key, value) in &values {
        let value: &str = value.as_ref();
        let shown = if key.is_secret() { "<redacted>" } else { value };
        tracing::debug!(%key, value = shown, "binding configuration value");
        if let Err(error) = apply(&mut builder, *key, value) {
            errors.push(error);
        }
    }

    errors.extend(builder.validate());
    if !errors.is_empty() {
        errors.sort_by_key(|error| error.key);
        return Err(ValidationErrors(errors));
    }
    builder.build()
}

fn apply(
    builder: &mut ConnectorSettingsBuilder,
    key: ConfigKey,
    value: &str,
) -> Result<(), ValidationError> {
    match key {
        ConfigKey::SynonymsEnabled => {
            builder.synonyms_enabled(parse_bool(key, value)?);
        }
        ConfigKey::NumberDefaultScale => {
            builder.number_default_scale(parse_integer(key, value)?);
        }
        ConfigKey::NumberRoundingMode => {
            let mode = value.parse::<RoundingMode>().map_err(|_| {
                ValidationError::new(key, value, Constraint::OneOf(ROUNDING_MODE_NAMES))
            })?;
            builder.number_rounding_mode(mode);
        }
        ConfigKey::VarcharMaxSize => {
            builder.varchar_max_size(parse_integer(key, value)?);
        }
        ConfigKey::TimestampPrecision => {
            builder.timestamp_default_precision(parse_integer(key, value)?);
        }
        ConfigKey::TlsEnabled => {
            builder.tls_enabled(parse_bool(key, value)?);
        }
        ConfigKey::KeystorePath => {
            builder.keystore_path(value);
        }
        ConfigKey::TruststorePath => {
            builder.truststore_path(value);
        }
        ConfigKey::KeystorePassword => {
            builder.keystore_password(value);
        }
        ConfigKey::TruststorePassword => {
            builder.truststore_password(value);
        }
    }
    Ok(())
}

fn parse_bool(key: ConfigKey, value: &str) -> Result<bool, ValidationError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ValidationError::new(key, value, Constraint::Boolean))
    }
}

fn parse_integer(key: ConfigKey, value: &str) -> Result<i64, ValidationError> {
    value
        .trim()
        .parse()
        .map_err(|_| ValidationError::new(key, value, Constraint::Integer))
}
