//! Hardware-independent drivers for the Quindar radio
//!
//! Driver implementations of the `quindar-hal` contracts that need no
//! MCU-specific peripheral underneath, usable on any target as well as in
//! host-side tests. MCU-specific UART and timer drivers live in their own
//! per-chip crates.

#![no_std]
#![deny(unsafe_code)]

pub mod serial;

pub use serial::{LoopbackSerialDriver, LOOPBACK_PORTS};
