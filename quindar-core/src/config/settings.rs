//! Radio settings consulted by the port layer
//!
//! The port layer's slice of the radio's persistent settings blob,
//! serialized to flash using postcard and loaded on boot.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magic number to identify valid settings data
pub const SETTINGS_MAGIC: u32 = 0x51505254; // "QPRT"

/// Current settings format version
pub const SETTINGS_VERSION: u8 = 1;

/// UART receiver sampling mode
///
/// Some receivers tolerate the sharper timing of one-bit sampling better
/// than the default majority vote; the user picks per radio, not per port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UartSampleMode {
    /// Majority-vote sampling (hardware default)
    #[default]
    Standard,
    /// Sample each bit once
    OneBit,
}

/// Persisted port-layer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadioSettings {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Board-wide UART sampling mode
    pub uart_sample_mode: UartSampleMode,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl RadioSettings {
    /// Create settings with defaults
    pub const fn new() -> Self {
        Self {
            magic: SETTINGS_MAGIC,
            version: SETTINGS_VERSION,
            uart_sample_mode: UartSampleMode::Standard,
        }
    }

    /// Check that the data carries the expected magic and version
    pub fn is_valid(&self) -> bool {
        self.magic == SETTINGS_MAGIC && self.version == SETTINGS_VERSION
    }

    /// Serialize into `buf`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize from flash bytes; `None` on garbage or a format mismatch
    #[cfg(feature = "serde")]
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        postcard::from_bytes::<Self>(bytes)
            .ok()
            .filter(Self::is_valid)
    }
}
