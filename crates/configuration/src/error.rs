//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use crate::environment::{self, Variable};
use crate::keys::ConfigKey;

/// A rule that a bound value has to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Boolean,
    Integer,
    AtLeast(i64),
    Between(i64, i64),
    OneOf(&'static [&'static str]),
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Constraint::Boolean => write!(f, "must be 'true' or 'false'"),
            Constraint::Integer => write!(f, "must be an integer"),
            Constraint::AtLeast(min) => write!(f, "must be greater than or equal to {min}"),
            Constraint::Between(min, max) => write!(f, "must be between {min} and {max}"),
            Constraint::OneOf(allowed) => write!(f, "must be one of [{}]", allowed.join(", ")),
        }
    }
}

/// A single value that could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value '{value}' for '{key}': {constraint}")]
pub struct ValidationError {
    pub key: ConfigKey,
    pub value: String,
    pub constraint: Constraint,
}

impl ValidationError {
    pub fn new(key: ConfigKey, value: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            key,
            value: value.into(),
            constraint,
        }
    }
}

/// Every violation found in one configuration load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid connector settings:{}", format_violations(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = ConfigKey> + '_ {
        self.0.iter().map(|error| error.key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// An environment variable that a placeholder refers to, and why it could not be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{key}' refers to {variable}: {source}")]
pub struct MissingEnvironmentVariable {
    pub key: String,
    pub variable: Variable,
    pub source: environment::Error,
}

/// The errors that can be thrown when parsing a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum ParseConfigurationError {
    #[error("parse error on line {line} of {file_path}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("I/O error reading {file_path}: {source}")]
    IoError {
        file_path: PathBuf,
        source: std::io::Error,
    },
}

/// The errors that can be thrown when writing a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when resolving a parsed catalog into connector settings.
#[derive(Debug, thiserror::Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("missing environment variables:{}", format_missing(.0))]
    MissingEnvironmentVariables(Vec<MissingEnvironmentVariable>),
    #[error(transparent)]
    InvalidSettings(#[from] ValidationErrors),
}

fn format_violations(violations: &[ValidationError]) -> String {
    violations.iter().map(|error| format!("\n  {error}")).collect()
}

fn format_missing(missing: &[MissingEnvironmentVariable]) -> String {
    missing.iter().map(|error| format!("\n  {error}")).collect()
}
