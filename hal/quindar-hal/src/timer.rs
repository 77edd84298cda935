//! Pulse timer driver contract
//!
//! Timers generate protocol pulse trains (PPM and friends) directly on a
//! module bay pin. The port layer only opens and closes them; waveform
//! programming is the consuming protocol's business.

use crate::{DriverContext, HwDef};

/// Timer parameters, passed to the driver on `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Timer tick frequency in Hz
    pub tick_hz: u32,
    /// Initial pulse frame period in microseconds
    pub period_us: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        // 2 MHz tick, 22.5 ms frame: the classic PPM defaults
        Self {
            tick_hz: 2_000_000,
            period_us: 22_500,
        }
    }
}

/// Pulse timer backend
pub trait TimerDriver: Sync {
    /// Claim the timer and prepare it for pulse generation.
    ///
    /// Returns `None` when the hardware could not be claimed.
    fn init(&self, hw_def: HwDef, config: &TimerConfig) -> Option<DriverContext>;

    /// Stop pulse generation and release the timer.
    ///
    /// Must not be called while an interrupt handler may still use `ctx`.
    fn deinit(&self, ctx: DriverContext);
}
