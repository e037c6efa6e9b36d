mod password;
mod property_value;
mod rounding_mode;

pub use password::Password;
pub use property_value::PropertyValue;
pub use rounding_mode::{RoundingMode, UnknownRoundingMode, ROUNDING_MODE_NAMES};
