//! Settings for the Oracle connector: what a catalog file may set, how its values are bound,
//! and the rules they have to satisfy before the connector starts.

pub mod binding;
pub mod catalog;
pub mod environment;
pub mod error;
pub mod keys;
pub mod properties;
pub mod settings;
mod to_runtime_configuration;
pub mod values;

pub use binding::bind;
pub use catalog::{
    parse_configuration, write_parsed_configuration, ParsedConfiguration, CONFIGURATION_FILENAME,
};
pub use error::{ValidationError, ValidationErrors};
pub use keys::ConfigKey;
pub use settings::{ConnectorSettings, ConnectorSettingsBuilder};
pub use to_runtime_configuration::make_runtime_configuration;
pub use values::RoundingMode;
