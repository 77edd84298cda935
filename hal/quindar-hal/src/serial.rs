//! Serial driver contract
//!
//! The operation set a hardware UART or bit-banged soft-serial backend
//! implements to carry module and telemetry traffic. Received bytes are
//! delivered into the driver's internal buffer from interrupt context;
//! the registered callbacks likewise fire from interrupt context.

use bitflags::bitflags;

use crate::{DriverContext, HwDef};

/// Signal polarity relative to the protocol's nominal line level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    Normal,
    Inverted,
}

/// Character framing on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Encoding {
    /// 8 data bits, no parity, 1 stop bit
    #[default]
    EightN1,
    /// 8 data bits, even parity, 2 stop bits
    EightE2,
}

bitflags! {
    /// Transfer directions a port supports, or is being opened for
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Directions: u8 {
        const RX = 1 << 0;
        const TX = 1 << 1;
        const TX_RX = Self::RX.bits() | Self::TX.bits();
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Directions {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Directions(rx={=bool}, tx={=bool})",
            self.contains(Self::RX),
            self.contains(Self::TX)
        );
    }
}

/// Serial port parameters, passed to the driver on `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Character framing
    pub encoding: Encoding,
    /// Directions to open
    pub direction: Directions,
    /// Line polarity
    pub polarity: Polarity,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            encoding: Encoding::EightN1,
            direction: Directions::empty(),
            polarity: Polarity::Normal,
        }
    }
}

/// Hardware-specific receiver refinements a driver may support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HwOption {
    /// Oversample by 8 instead of 16, for high baud rates
    Oversample8,
    /// Sample each bit once instead of majority-voting
    OneBit,
}

/// Invoked from interrupt context with bytes the driver received
pub type ReceiveCallback = fn(&[u8]);

/// Invoked from interrupt context when the line goes idle
pub type IdleCallback = fn();

/// Invoked when the link negotiates a new baud rate
pub type BaudrateCallback = fn(u32);

/// Serial communication backend
///
/// Implementations are static singletons servicing one or more physical
/// ports; every operation takes the [`DriverContext`] issued by `init`.
pub trait SerialDriver: Sync {
    /// Bring the port up.
    ///
    /// Returns `None` when the hardware could not be claimed; the caller
    /// treats the port as unavailable.
    fn init(&self, hw_def: HwDef, config: &SerialConfig) -> Option<DriverContext>;

    /// Shut the port down and release the hardware.
    ///
    /// Must not be called while an interrupt handler may still use `ctx`;
    /// quiescing the interrupt source is the caller's responsibility.
    fn deinit(&self, ctx: DriverContext);

    /// Send a single byte
    fn send_byte(&self, ctx: DriverContext, byte: u8);

    /// Send a buffer
    fn send_buffer(&self, ctx: DriverContext, data: &[u8]);

    /// Whether the last transmission has fully left the shifter
    fn tx_completed(&self, ctx: DriverContext) -> bool;

    /// Wait for the last transmission to complete
    fn wait_tx_completed(&self, ctx: DriverContext);

    /// Re-enable the receiver after transmitting (2-wire half-duplex
    /// bus turnaround)
    fn enable_rx(&self, ctx: DriverContext);

    /// Fetch one byte from the driver's receive buffer
    fn get_byte(&self, ctx: DriverContext) -> Option<u8>;

    /// Drop everything in the receive buffer
    fn clear_rx_buffer(&self, ctx: DriverContext);

    /// Current baud rate
    fn baudrate(&self, ctx: DriverContext) -> u32;

    /// Change the baud rate without reopening the port
    fn set_baudrate(&self, ctx: DriverContext, baudrate: u32);

    /// Apply a hardware refinement. Drivers without the capability
    /// ignore the request.
    fn set_hw_option(&self, ctx: DriverContext, option: HwOption) {
        let _ = (ctx, option);
    }

    /// Register a receive callback, `None` to unregister
    fn set_receive_callback(&self, ctx: DriverContext, callback: Option<ReceiveCallback>) {
        let _ = (ctx, callback);
    }

    /// Register a line-idle callback, `None` to unregister
    fn set_idle_callback(&self, ctx: DriverContext, callback: Option<IdleCallback>) {
        let _ = (ctx, callback);
    }

    /// Register a baud-rate-change callback, `None` to unregister
    fn set_baudrate_callback(&self, ctx: DriverContext, callback: Option<BaudrateCallback>) {
        let _ = (ctx, callback);
    }
}
