//! Persisted configuration
//!
//! Board-agnostic settings structures stored as postcard binary data.

mod settings;

pub use settings::{RadioSettings, UartSampleMode, SETTINGS_MAGIC, SETTINGS_VERSION};
