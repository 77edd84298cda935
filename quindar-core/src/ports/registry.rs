//! Module-port registry
//!
//! Owns the runtime side of the port layer: per-module binding states, the
//! module power mask and the optional runtime-configured spare port. Built
//! once at startup around the board's module table and threaded to every
//! caller, so nothing here is ambient global state.
//!
//! All operations are synchronous and run in the application context.
//! Bound driver contexts are also consumed by interrupt handlers; before
//! asking for [`release`](ModulePortRegistry::release) the caller must
//! quiesce the relevant interrupt source - the registry has no
//! interrupt-masking authority of its own.

use quindar_hal::{Directions, DriverContext, HwOption, Polarity, SerialConfig, TimerConfig};

use crate::config::UartSampleMode;

use super::descriptor::{
    Capability, LogicalPort, ModuleDescriptor, PortDescriptor, PortDriver, MAX_MODULES,
};
use super::matcher;
use super::state::{ModuleState, ModuleStateHandle};

/// Baud rate at or above which the telemetry UART needs oversampling by 8
pub const TELEMETRY_HIGH_SPEED_BAUD: u32 = 400_000;

/// Runtime owner of all module-port state
pub struct ModulePortRegistry<'a> {
    modules: &'a [ModuleDescriptor],
    states: [ModuleState; MAX_MODULES],
    power_mask: u8,
    uart_sample_mode: UartSampleMode,
    extra_port_module: Option<usize>,
    extra_port: Option<PortDescriptor>,
}

impl<'a> ModulePortRegistry<'a> {
    /// Build the registry around the board's module table.
    ///
    /// All states start unbound, all power rails unpowered, the spare
    /// port unconfigured.
    pub fn new(modules: &'a [ModuleDescriptor]) -> Self {
        debug_assert!(modules.len() <= MAX_MODULES, "module table too large");
        Self {
            modules,
            states: [ModuleState::default(); MAX_MODULES],
            power_mask: 0,
            uart_sample_mode: UartSampleMode::Standard,
            extra_port_module: None,
            extra_port: None,
        }
    }

    /// Apply the persisted board-wide UART sampling mode
    pub fn set_uart_sample_mode(&mut self, mode: UartSampleMode) {
        self.uart_sample_mode = mode;
    }

    /// The board's description of `module`, if the bay exists
    pub fn module_descriptor(&self, module: usize) -> Option<&ModuleDescriptor> {
        self.modules.get(module)
    }

    /// The binding state of `module`, if the bay can exist on any board
    pub fn module_state(&self, module: usize) -> Option<&ModuleState> {
        self.states.get(module)
    }

    /// The binding state behind a handle issued by a bind operation
    pub fn state(&self, handle: ModuleStateHandle) -> &ModuleState {
        &self.states[handle.module()]
    }

    /// Resolve a port without the soft-serial substitution
    pub fn find_port(
        &self,
        module: usize,
        capability: Capability,
        port: LogicalPort,
        polarity: Polarity,
    ) -> Option<PortDescriptor> {
        self.resolve(module, capability, port, polarity, false)
    }

    fn resolve(
        &self,
        module: usize,
        capability: Capability,
        port: LogicalPort,
        polarity: Polarity,
        allow_fallback: bool,
    ) -> Option<PortDescriptor> {
        if module >= MAX_MODULES {
            return None;
        }
        let md = self.modules.get(module)?;

        if let Some(p) = matcher::resolve(md, capability, port, polarity, allow_fallback) {
            return Some(*p);
        }

        // last resort: the runtime-configured spare port of the one
        // designated module
        if self.extra_port_module == Some(module) {
            if let Some(extra) = self.extra_port.as_ref() {
                if matcher::extra_port_match(extra, capability, port, polarity) {
                    return Some(*extra);
                }
            }
        }

        None
    }

    /// Bind a serial port of `module` for the directions in `params`.
    ///
    /// `softserial_fallback` permits substituting a bit-banged inverted
    /// port when no hardware UART can produce the inverted line. Returns
    /// `None` when nothing matches or the driver rejects the port; the
    /// caller must treat the port as unavailable on this build.
    pub fn bind_serial(
        &mut self,
        module: usize,
        port: LogicalPort,
        params: &SerialConfig,
        softserial_fallback: bool,
    ) -> Option<ModuleStateHandle> {
        let found = self.resolve(
            module,
            Capability::Serial,
            port,
            params.polarity,
            softserial_fallback,
        )?;

        let dir = params.direction & Directions::TX_RX;
        if dir == Directions::TX_RX {
            // bring up RX first: TX may already be bound from an earlier
            // bind of the same half-duplex bus, and a second hardware init
            // would disturb its in-flight transmit state
            let ctx = Self::init_serial(&found, params, self.uart_sample_mode)?;
            let state = &mut self.states[module];
            state.bind_rx(found, ctx);
            if !state.tx().is_bound() {
                state.alias_tx_to_rx();
            }
        } else if dir == Directions::TX {
            let ctx = Self::init_serial(&found, params, self.uart_sample_mode)?;
            self.states[module].bind_tx(found, ctx);
        } else if dir == Directions::RX {
            let ctx = Self::init_serial(&found, params, self.uart_sample_mode)?;
            self.states[module].bind_rx(found, ctx);
        }

        Some(ModuleStateHandle(module as u8))
    }

    /// Bind a pulse timer of `module` (transmit only, normal polarity)
    pub fn bind_timer(
        &mut self,
        module: usize,
        port: LogicalPort,
        config: &TimerConfig,
    ) -> Option<ModuleStateHandle> {
        let found = self.resolve(module, Capability::Timer, port, Polarity::Normal, false)?;
        let drv = match found.driver {
            PortDriver::Timer(drv) => drv,
            PortDriver::Serial(_) => return None,
        };

        let ctx = drv.init(found.hw_def, config)?;
        if let Some(set_inverted) = found.set_inverted {
            set_inverted(false);
        }
        self.states[module].bind_tx(found, ctx);

        Some(ModuleStateHandle(module as u8))
    }

    /// Close every driver context bound for this handle's module and zero
    /// its bindings. A no-op when nothing is bound.
    pub fn release(&mut self, handle: ModuleStateHandle) {
        self.states[handle.module()].release();
    }

    fn init_serial(
        port: &PortDescriptor,
        params: &SerialConfig,
        sample_mode: UartSampleMode,
    ) -> Option<DriverContext> {
        let drv = match port.driver {
            PortDriver::Serial(drv) => drv,
            PortDriver::Timer(_) => return None,
        };

        let ctx = drv.init(port.hw_def, params)?;

        // the telemetry bus needs tighter receiver sampling at high rates
        if port.port == LogicalPort::TelemetryUart && params.baudrate >= TELEMETRY_HIGH_SPEED_BAUD {
            drv.set_hw_option(ctx, HwOption::Oversample8);
            if sample_mode == UartSampleMode::OneBit {
                drv.set_hw_option(ctx, HwOption::OneBit);
            }
        }

        if let Some(set_inverted) = port.set_inverted {
            set_inverted(params.polarity == Polarity::Inverted);
        }

        Some(ctx)
    }

    /// Switch a module's power rail and remember the commanded state.
    ///
    /// A no-op when the bay does not exist or has no power switch. The
    /// mask records the last commanded state, not a hardware readback.
    pub fn set_power(&mut self, module: usize, enable: bool) {
        if module >= MAX_MODULES {
            return;
        }
        let set_power = match self.modules.get(module).and_then(|m| m.power_control()) {
            Some(set_power) => set_power,
            None => return,
        };

        set_power(enable);
        if enable {
            self.power_mask |= 1 << module;
        } else {
            self.power_mask &= !(1 << module);
        }
    }

    /// Whether `module`'s rail was last commanded on
    pub fn is_powered(&self, module: usize) -> bool {
        module < MAX_MODULES && self.power_mask & (1 << module) != 0
    }

    /// Board startup: designate the one module allowed to match the
    /// runtime-configured spare port. Boards without the capability never
    /// call this and the spare-port step is skipped entirely.
    pub fn enable_extra_port(&mut self, module: usize) {
        debug_assert!(module < MAX_MODULES, "bad spare-port module");
        if module < MAX_MODULES {
            self.extra_port_module = Some(module);
        }
    }

    /// Install the spare-port description (copied; the caller keeps no
    /// alias into the registry). Configuring a spare port on a board that
    /// never designated a module for it is a wiring-code defect.
    pub fn configure_extra_port(&mut self, port: PortDescriptor) {
        debug_assert!(
            self.extra_port_module.is_some(),
            "spare port configured without a designated module"
        );
        if self.extra_port_module.is_some() {
            self.extra_port = Some(port);
        }
    }

    /// Restore the spare port to its unconfigured state
    pub fn reset_extra_port(&mut self) {
        self.extra_port = None;
    }
}
