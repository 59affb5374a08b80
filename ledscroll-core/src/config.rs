//! Display configuration
//!
//! Construction-time options for a [`Display`](crate::Display). With the
//! `serde` feature the configuration can be persisted as postcard binary
//! data (e.g. in flash) and, with the `toml` feature, read from a TOML
//! document such as:
//!
//! ```toml
//! tiling = false
//! flip_horizontal = true
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Upper bound of the postcard encoding of [`DisplayConfig`]
pub const DISPLAY_CONFIG_MAX_SIZE: usize = 3;

/// Configuration loading/storing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small or value not encodable
    Serialize,
    /// Stored bytes are not a valid configuration
    Deserialize,
    /// TOML text could not be parsed
    Parse,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::Serialize => "failed to serialize display config",
            Self::Deserialize => "failed to deserialize display config",
            Self::Parse => "failed to parse display config",
        };
        f.write_str(msg)
    }
}

/// Display options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct DisplayConfig {
    /// Repeat the buffer periodically when scrolling past its edges
    pub tiling: bool,
    /// Mirror the panel left to right
    pub flip_horizontal: bool,
    /// Mirror the panel top to bottom
    pub flip_vertical: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConfig {
    /// Defaults: tiling on, no flip
    pub const fn new() -> Self {
        Self {
            tiling: true,
            flip_horizontal: false,
            flip_vertical: false,
        }
    }

    /// Set the initial tiling mode
    pub const fn with_tiling(mut self, enabled: bool) -> Self {
        self.tiling = enabled;
        self
    }

    /// Set the initial flip flags
    pub const fn with_flip(mut self, horizontal: bool, vertical: bool) -> Self {
        self.flip_horizontal = horizontal;
        self.flip_vertical = vertical;
        self
    }

    /// Encode as postcard binary into `buf`
    ///
    /// Returns the used part of `buf`.
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }

    /// Decode from postcard binary
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }

    /// Parse from a TOML document
    ///
    /// Missing keys keep their defaults, unknown keys are rejected.
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|_| ConfigError::Parse)
    }
}
