//! Software loopback serial driver
//!
//! A serial backend with no hardware underneath: bytes sent on a port are
//! looped straight into that port's receive buffer. Useful for exercising
//! protocol code on the host and for simulator builds where a module bay
//! must answer its own telemetry polls.
//!
//! The driver is a static singleton servicing up to [`LOOPBACK_PORTS`]
//! ports; the board's `HwDef` selects the slot, and the issued context is
//! the slot index.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Deque;

use quindar_hal::{Directions, DriverContext, HwDef, SerialConfig, SerialDriver};

/// Ports one driver instance can service
pub const LOOPBACK_PORTS: usize = 4;

/// Receive buffer depth per port
const RX_BUFFER: usize = 64;

struct Slot {
    used: bool,
    baudrate: u32,
    rx_enabled: bool,
    rx: Deque<u8, RX_BUFFER>,
}

impl Slot {
    const EMPTY: Slot = Slot {
        used: false,
        baudrate: 0,
        rx_enabled: false,
        rx: Deque::new(),
    };
}

/// Loopback serial backend
pub struct LoopbackSerialDriver {
    slots: Mutex<CriticalSectionRawMutex, RefCell<[Slot; LOOPBACK_PORTS]>>,
}

impl LoopbackSerialDriver {
    pub const fn new() -> Self {
        Self {
            slots: Mutex::new(RefCell::new([Slot::EMPTY; LOOPBACK_PORTS])),
        }
    }

    fn with_slot<R>(&self, ctx: DriverContext, f: impl FnOnce(&mut Slot) -> R) -> Option<R> {
        if ctx.0 >= LOOPBACK_PORTS {
            return None;
        }
        self.slots.lock(|slots| {
            let mut slots = slots.borrow_mut();
            let slot = &mut slots[ctx.0];
            slot.used.then(|| f(slot))
        })
    }
}

impl Default for LoopbackSerialDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialDriver for LoopbackSerialDriver {
    fn init(&self, hw_def: HwDef, config: &SerialConfig) -> Option<DriverContext> {
        if hw_def.0 >= LOOPBACK_PORTS {
            return None;
        }
        self.slots.lock(|slots| {
            let mut slots = slots.borrow_mut();
            let slot = &mut slots[hw_def.0];
            if slot.used {
                return None;
            }
            slot.used = true;
            slot.baudrate = config.baudrate;
            slot.rx_enabled = config.direction.contains(Directions::RX);
            slot.rx.clear();
            Some(DriverContext(hw_def.0))
        })
    }

    fn deinit(&self, ctx: DriverContext) {
        self.with_slot(ctx, |slot| {
            slot.used = false;
            slot.rx_enabled = false;
            slot.baudrate = 0;
            slot.rx.clear();
        });
    }

    fn send_byte(&self, ctx: DriverContext, byte: u8) {
        self.with_slot(ctx, |slot| {
            if slot.rx_enabled {
                // overflow drops the byte, like a full hardware FIFO
                let _ = slot.rx.push_back(byte);
            }
        });
    }

    fn send_buffer(&self, ctx: DriverContext, data: &[u8]) {
        self.with_slot(ctx, |slot| {
            if slot.rx_enabled {
                for &byte in data {
                    let _ = slot.rx.push_back(byte);
                }
            }
        });
    }

    fn tx_completed(&self, _ctx: DriverContext) -> bool {
        // nothing is ever in flight
        true
    }

    fn wait_tx_completed(&self, _ctx: DriverContext) {}

    fn enable_rx(&self, ctx: DriverContext) {
        self.with_slot(ctx, |slot| slot.rx_enabled = true);
    }

    fn get_byte(&self, ctx: DriverContext) -> Option<u8> {
        self.with_slot(ctx, |slot| slot.rx.pop_front()).flatten()
    }

    fn clear_rx_buffer(&self, ctx: DriverContext) {
        self.with_slot(ctx, |slot| slot.rx.clear());
    }

    fn baudrate(&self, ctx: DriverContext) -> u32 {
        self.with_slot(ctx, |slot| slot.baudrate).unwrap_or(0)
    }

    fn set_baudrate(&self, ctx: DriverContext, baudrate: u32) {
        self.with_slot(ctx, |slot| slot.baudrate = baudrate);
    }
}
