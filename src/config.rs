//! Codec configuration
//!
//! Byte order is fixed when a [`Codec`](crate::Codec) is created and applies to
//! every multi-byte scalar it reads or writes, including length prefixes and
//! frame headers.

use std::fmt;
use std::str::FromStr;

/// Wire byte order for multi-byte scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

impl ByteOrder {
    /// Whether native bytes must be reversed to reach this order on the current host.
    #[inline(always)]
    pub const fn differs_from_native(self) -> bool {
        match self {
            ByteOrder::Little => cfg!(target_endian = "big"),
            ByteOrder::Big => cfg!(target_endian = "little"),
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ByteOrder::Little => write!(f, "little"),
            ByteOrder::Big => write!(f, "big"),
        }
    }
}

impl FromStr for ByteOrder {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" | "little-endian" => Ok(ByteOrder::Little),
            "big" | "be" | "big-endian" | "network" => Ok(ByteOrder::Big),
            _ => Err(ParseConfigError {
                field: "byte order",
                value: s.to_string(),
            }),
        }
    }
}

/// How floating-point scalars are laid out under a non-native byte order.
///
/// `Native` keeps `f32`/`f64` in host order whatever the configured order is.
/// Peers speaking the legacy protocol expect this, so it is the default.
/// `Configured` treats floats like every other scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloatOrder {
    #[default]
    Native,
    Configured,
}

impl FromStr for FloatOrder {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "legacy" => Ok(FloatOrder::Native),
            "configured" | "strict" => Ok(FloatOrder::Configured),
            _ => Err(ParseConfigError {
                field: "float order",
                value: s.to_string(),
            }),
        }
    }
}

/// Unrecognized configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {field}: {value:?}")]
pub struct ParseConfigError {
    pub field: &'static str,
    pub value: String,
}

/// Codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CodecConfig {
    pub byte_order: ByteOrder,
    pub float_order: FloatOrder,
}

impl CodecConfig {
    pub const fn new(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            float_order: FloatOrder::Native,
        }
    }

    pub const fn with_float_order(mut self, float_order: FloatOrder) -> Self {
        self.float_order = float_order;
        self
    }
}
