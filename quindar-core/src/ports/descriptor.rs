//! Port and module descriptors
//!
//! Board startup code builds one [`ModuleDescriptor`] per module bay from
//! its wiring configuration. Bays with alternative hardware ("a UART here,
//! else a timer") push whichever descriptor the configuration selects.
//! Descriptors never change after construction.

use heapless::Vec;
use quindar_hal::{Directions, HwDef, SerialDriver, TimerDriver};

/// Maximum module bays a board can carry
pub const MAX_MODULES: usize = 4;

/// Maximum physical ports per module bay
pub const MAX_MODULE_PORTS: usize = 8;

/// Conventional bay index of the internal RF module
pub const INTERNAL_MODULE: usize = 0;

/// Conventional bay index of the external RF module
pub const EXTERNAL_MODULE: usize = 1;

/// Conventional bay index of the telemetry bus
pub const TELEMETRY_MODULE: usize = 2;

/// Kind of physical resource a descriptor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Capability {
    Serial,
    Timer,
}

/// Connector/role a physical port can back
///
/// Several identifiers can share a capability; the identifier names the
/// role, not the peripheral implementing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogicalPort {
    InternalUart,
    InternalTimer,
    ExternalUart,
    ExternalTimer,
    /// Telemetry bus UART (half-duplex S.PORT-style link)
    TelemetryUart,
    /// Telemetry bus line with inverted signalling
    TelemetryUartInverted,
    /// Bit-banged serial on the external bay pin, inverted signalling
    SoftSerialInverted,
}

impl LogicalPort {
    /// Ports whose signalling is inverted by definition, so an inverted
    /// request needs no polarity setter on the descriptor
    pub const fn inherently_inverted(self) -> bool {
        matches!(
            self,
            LogicalPort::TelemetryUartInverted | LogicalPort::SoftSerialInverted
        )
    }
}

/// Driver backing a port, tagged by capability
#[derive(Clone, Copy)]
pub enum PortDriver {
    Serial(&'static dyn SerialDriver),
    Timer(&'static dyn TimerDriver),
}

impl PortDriver {
    pub const fn capability(&self) -> Capability {
        match self {
            PortDriver::Serial(_) => Capability::Serial,
            PortDriver::Timer(_) => Capability::Timer,
        }
    }
}

impl core::fmt::Debug for PortDriver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PortDriver::Serial(_) => f.write_str("Serial"),
            PortDriver::Timer(_) => f.write_str("Timer"),
        }
    }
}

/// Immutable description of one physical port of a module bay
#[derive(Debug, Clone, Copy)]
pub struct PortDescriptor {
    /// Logical role this port backs
    pub port: LogicalPort,
    /// Driver servicing the port
    pub driver: PortDriver,
    /// Directions the hardware supports
    pub dir: Directions,
    /// Board-supplied hardware definition, passed through to the driver
    pub hw_def: HwDef,
    /// Polarity setter, present when the board can invert the line
    pub set_inverted: Option<fn(bool)>,
}

impl PortDescriptor {
    /// Describe a serial port
    pub const fn serial(
        port: LogicalPort,
        dir: Directions,
        driver: &'static dyn SerialDriver,
        hw_def: HwDef,
    ) -> Self {
        Self {
            port,
            driver: PortDriver::Serial(driver),
            dir,
            hw_def,
            set_inverted: None,
        }
    }

    /// Describe a pulse timer port (transmit only by nature)
    pub const fn timer(port: LogicalPort, driver: &'static dyn TimerDriver, hw_def: HwDef) -> Self {
        Self {
            port,
            driver: PortDriver::Timer(driver),
            dir: Directions::TX,
            hw_def,
            set_inverted: None,
        }
    }

    /// Attach a polarity setter
    pub const fn with_polarity_setter(mut self, set_inverted: fn(bool)) -> Self {
        self.set_inverted = Some(set_inverted);
        self
    }

    /// The capability this port offers, derived from its driver
    pub const fn capability(&self) -> Capability {
        self.driver.capability()
    }
}

/// Board-supplied description of one module bay
#[derive(Debug, Default)]
pub struct ModuleDescriptor {
    ports: Vec<PortDescriptor, MAX_MODULE_PORTS>,
    set_power: Option<fn(bool)>,
}

impl ModuleDescriptor {
    pub fn builder() -> ModuleDescriptorBuilder {
        ModuleDescriptorBuilder {
            inner: ModuleDescriptor::default(),
        }
    }

    /// The bay's physical ports, in board-declared order
    pub fn ports(&self) -> &[PortDescriptor] {
        &self.ports
    }

    /// The bay's power-rail switch, if it has one
    pub fn power_control(&self) -> Option<fn(bool)> {
        self.set_power
    }
}

/// Builder for [`ModuleDescriptor`], used by board startup code
#[derive(Debug)]
pub struct ModuleDescriptorBuilder {
    inner: ModuleDescriptor,
}

impl ModuleDescriptorBuilder {
    /// Add a pre-built descriptor
    pub fn port(mut self, descriptor: PortDescriptor) -> Self {
        if self.inner.ports.push(descriptor).is_err() {
            debug_assert!(false, "module port table full");
        }
        self
    }

    /// Add a serial port
    pub fn serial(
        self,
        port: LogicalPort,
        dir: Directions,
        driver: &'static dyn SerialDriver,
        hw_def: HwDef,
    ) -> Self {
        self.port(PortDescriptor::serial(port, dir, driver, hw_def))
    }

    /// Add a pulse timer port
    pub fn timer(self, port: LogicalPort, driver: &'static dyn TimerDriver, hw_def: HwDef) -> Self {
        self.port(PortDescriptor::timer(port, driver, hw_def))
    }

    /// Attach the bay's power-rail switch
    pub fn power(mut self, set_power: fn(bool)) -> Self {
        self.inner.set_power = Some(set_power);
        self
    }

    pub fn build(self) -> ModuleDescriptor {
        self.inner
    }
}
