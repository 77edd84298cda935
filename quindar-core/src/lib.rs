//! Board-agnostic module-port core for the Quindar radio firmware
//!
//! Each logical module bay of the transmitter (internal RF, external RF,
//! telemetry bus) can be backed by different physical resources depending
//! on board and configuration: a hardware UART, a bit-banged soft-serial
//! line or a pulse timer. This crate decides which physical port backs a
//! requested logical port and manages the lifecycle of the driver context
//! bound to it:
//!
//! - Port and module descriptors, built at startup from board wiring
//! - The matching rules, including inverted soft-serial substitution
//! - Per-module binding state and the module-port registry
//! - Module power control
//! - Persisted settings the port layer consults

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod ports;
