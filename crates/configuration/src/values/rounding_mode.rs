use std::str::FromStr;

use enum_iterator::Sequence;
use serde::Serialize;

/// How a numeric value is rounded when it is narrowed to the default scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Sequence)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundingMode {
    Up,
    Down,
    Ceiling,
    Floor,
    #[default]
    HalfUp,
    HalfDown,
    HalfEven,
    Unnecessary,
}

/// Identifiers of every rounding mode, in declaration order.
pub const ROUNDING_MODE_NAMES: &[&str] = &[
    "UP",
    "DOWN",
    "CEILING",
    "FLOOR",
    "HALF_UP",
    "HALF_DOWN",
    "HALF_EVEN",
    "UNNECESSARY",
];

impl RoundingMode {
    pub fn as_str(self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Unnecessary => "UNNECESSARY",
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rounding mode '{0}'")]
pub struct UnknownRoundingMode(pub String);

/// Case-insensitive; `-` may stand in for `_`.
impl FromStr for RoundingMode {
    type Err = UnknownRoundingMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        enum_iterator::all::<RoundingMode>()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| UnknownRoundingMode(s.to_string()))
    }
}
