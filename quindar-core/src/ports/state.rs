//! Runtime binding state
//!
//! One [`ModuleState`] per module bay: a transmit and a receive binding.
//! On a half-duplex bus both directions run through one driver context, so
//! the two bindings may alias the same context; teardown must then close
//! that context exactly once.

use quindar_hal::{DriverContext, SerialDriver, TimerDriver};

use super::descriptor::{PortDescriptor, PortDriver};

/// One direction's binding to a physical port
///
/// Unbound bindings hold neither a descriptor nor a context; a bound
/// binding holds its own copy of the descriptor that produced it, so later
/// table or spare-port changes cannot pull the rug out from under it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DriverBinding {
    port: Option<PortDescriptor>,
    ctx: Option<DriverContext>,
}

impl DriverBinding {
    pub fn is_bound(&self) -> bool {
        self.port.is_some()
    }

    /// The descriptor this binding was resolved from
    pub fn port(&self) -> Option<&PortDescriptor> {
        self.port.as_ref()
    }

    /// The driver context, when bound
    pub fn ctx(&self) -> Option<DriverContext> {
        self.ctx
    }

    /// Driver and context for byte I/O, when bound to a serial port
    pub fn serial_io(&self) -> Option<(&'static dyn SerialDriver, DriverContext)> {
        match (self.port.as_ref()?.driver, self.ctx?) {
            (PortDriver::Serial(drv), ctx) => Some((drv, ctx)),
            _ => None,
        }
    }

    /// Driver and context, when bound to a pulse timer
    pub fn timer_io(&self) -> Option<(&'static dyn TimerDriver, DriverContext)> {
        match (self.port.as_ref()?.driver, self.ctx?) {
            (PortDriver::Timer(drv), ctx) => Some((drv, ctx)),
            _ => None,
        }
    }

    pub(crate) fn bind(&mut self, port: PortDescriptor, ctx: DriverContext) {
        self.port = Some(port);
        self.ctx = Some(ctx);
    }

    /// Close the bound context through the driver that opened it
    fn deinit(&self) {
        if let (Some(port), Some(ctx)) = (self.port.as_ref(), self.ctx) {
            match port.driver {
                PortDriver::Serial(drv) => drv.deinit(ctx),
                PortDriver::Timer(drv) => drv.deinit(ctx),
            }
        }
    }

    fn clear(&mut self) {
        *self = DriverBinding::default();
    }
}

/// Per-module binding state: one transmit and one receive binding
#[derive(Debug, Default, Clone, Copy)]
pub struct ModuleState {
    tx: DriverBinding,
    rx: DriverBinding,
}

impl ModuleState {
    /// The transmit-direction binding
    pub fn tx(&self) -> &DriverBinding {
        &self.tx
    }

    /// The receive-direction binding
    pub fn rx(&self) -> &DriverBinding {
        &self.rx
    }

    pub(crate) fn bind_tx(&mut self, port: PortDescriptor, ctx: DriverContext) {
        self.tx.bind(port, ctx);
    }

    pub(crate) fn bind_rx(&mut self, port: PortDescriptor, ctx: DriverContext) {
        self.rx.bind(port, ctx);
    }

    /// Share the receive binding's port and context with the transmit side
    pub(crate) fn alias_tx_to_rx(&mut self) {
        self.tx = self.rx;
    }

    /// Close both bindings and zero the state.
    ///
    /// When both directions share one context the driver is told once.
    pub(crate) fn release(&mut self) {
        if self.tx.is_bound() {
            self.tx.deinit();
        }
        if self.rx.is_bound() && self.rx.ctx() != self.tx.ctx() {
            self.rx.deinit();
        }
        self.tx.clear();
        self.rx.clear();
    }
}

/// Opaque handle to a module's binding state, held by protocol drivers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModuleStateHandle(pub(crate) u8);

impl ModuleStateHandle {
    /// The module bay this handle refers to
    pub fn module(self) -> usize {
        self.0 as usize
    }
}
