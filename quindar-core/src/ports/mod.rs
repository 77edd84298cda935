//! Module-port abstraction
//!
//! A module bay exposes logical ports (internal UART, external timer,
//! telemetry serial, ...) whose physical backing differs per board. Boards
//! describe their wiring as ordered [`PortDescriptor`] tables, one
//! [`ModuleDescriptor`] per bay; the [`ModulePortRegistry`] resolves
//! requests against those tables and owns the resulting driver bindings.
//!
//! Resolution prefers a direct hardware match, then - for inverted
//! requests, when the caller allows it - a bit-banged inverted soft-serial
//! substitute, and last the board's runtime-configured spare port.

pub mod descriptor;
mod matcher;
pub mod protocol;
pub mod registry;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptor::{
    Capability, LogicalPort, ModuleDescriptor, ModuleDescriptorBuilder, PortDescriptor,
    PortDriver, EXTERNAL_MODULE, INTERNAL_MODULE, MAX_MODULES, MAX_MODULE_PORTS, TELEMETRY_MODULE,
};
pub use protocol::ProtocolDriver;
pub use registry::{ModulePortRegistry, TELEMETRY_HIGH_SPEED_BAUD};
pub use state::{DriverBinding, ModuleState, ModuleStateHandle};
