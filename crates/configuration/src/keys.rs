//! The configuration keys a catalog file can set.

use enum_iterator::Sequence;

/// One of the dotted keys that binds onto a field of
/// [`ConnectorSettings`](crate::ConnectorSettings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence)]
pub enum ConfigKey {
    SynonymsEnabled,
    NumberDefaultScale,
    NumberRoundingMode,
    VarcharMaxSize,
    TimestampPrecision,
    TlsEnabled,
    KeystorePath,
    TruststorePath,
    KeystorePassword,
    TruststorePassword,
}

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::SynonymsEnabled => "oracle.synonyms.enabled",
            ConfigKey::NumberDefaultScale => "oracle.number.default-scale",
            ConfigKey::NumberRoundingMode => "oracle.number.rounding-mode",
            ConfigKey::VarcharMaxSize => "oracle.varchar.max-size",
            ConfigKey::TimestampPrecision => "oracle.timestamp.precision",
            ConfigKey::TlsEnabled => "oracle.tls.enabled",
            ConfigKey::KeystorePath => "oracle.tls.keystore-path",
            ConfigKey::TruststorePath => "oracle.tls.truststore-path",
            ConfigKey::KeystorePassword => "oracle.tls.keystore-password",
            ConfigKey::TruststorePassword => "oracle.tls.truststore-password",
        }
    }

    /// Look up a key by its dotted name. Names are matched exactly.
    pub fn from_name(name: &str) -> Option<Self> {
        enum_iterator::all::<ConfigKey>().find(|key| key.as_str() == name)
    }

    /// Whether the value bound to this key must not be echoed back in messages.
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            ConfigKey::KeystorePassword | ConfigKey::TruststorePassword
        )
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
