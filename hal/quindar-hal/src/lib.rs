//! Quindar driver contracts
//!
//! This crate defines the operation sets a communication backend must
//! implement to be usable by the module-port layer. Backends can be
//! hardware UARTs, bit-banged soft-serial ports or pulse timers; the
//! port layer routes requests to whichever backend the board wired in.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Protocol drivers (AFHDS, CRSF, ...)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  quindar-core (port resolution)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  quindar-hal (this crate - contracts)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ hardware UART │       │  soft serial, │
//! │   backends    │       │  pulse timers │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! Driver implementations are static singletons: one driver instance can
//! service several physical ports, telling them apart by an opaque
//! [`DriverContext`] it issues from `init`. The board's wiring tables pass
//! each port's hardware definition through as an opaque [`HwDef`]; neither
//! handle is ever interpreted by the port layer.

#![no_std]
#![deny(unsafe_code)]

pub mod serial;
pub mod timer;

/// Board-supplied hardware definition, passed through to the driver.
///
/// The value is meaningful only to the driver the board paired it with
/// (a peripheral index, a pin set, a lookup key - the driver decides).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HwDef(pub usize);

/// Opaque per-port context issued by a driver's `init`.
///
/// Callers hold it and hand it back on every subsequent driver call;
/// only the issuing driver knows what it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverContext(pub usize);

// Re-export key contract types at crate root for convenience
pub use serial::{
    BaudrateCallback, Directions, Encoding, HwOption, IdleCallback, Polarity, ReceiveCallback,
    SerialConfig, SerialDriver,
};
pub use timer::{TimerConfig, TimerDriver};
