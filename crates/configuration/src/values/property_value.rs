use crate::environment::Variable;

const ENV_PREFIX: &str = "${ENV:";
const ENV_SUFFIX: &str = "}";

/// A raw value from a catalog file, either written out or taken from the environment.
///
/// `${ENV:NAME}` stands for the variable `NAME`, read when the runtime configuration is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Plain(String),
    FromEnvironment { variable: Variable },
}

impl PropertyValue {
    pub fn parse(raw: &str) -> Self {
        match raw
            .strip_prefix(ENV_PREFIX)
            .and_then(|rest| rest.strip_suffix(ENV_SUFFIX))
        {
            Some(name) if !name.is_empty() => PropertyValue::FromEnvironment {
                variable: name.into(),
            },
            _ => PropertyValue::Plain(raw.to_string()),
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PropertyValue::Plain(value) => f.write_str(value),
            PropertyValue::FromEnvironment { variable } => {
                write!(f, "{ENV_PREFIX}{variable}{ENV_SUFFIX}")
            }
        }
    }
}
