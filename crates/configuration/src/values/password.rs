use serde::{Serialize, Serializer};

const REDACTED: &str = "<redacted>";

/// A keystore or truststore password.
///
/// Held in memory as given; only `Debug` and `Serialize` hide it.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_printed() {
        let password = Password::from("hunter2");
        assert_eq!(format!("{password:?}"), "<redacted>");
        assert_eq!(serde_json::to_string(&password).unwrap(), "\"<redacted>\"");
        assert_eq!(password.expose(), "hunter2");
    }
}
