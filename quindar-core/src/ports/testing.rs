//! Test doubles for the port layer
//!
//! Counting drivers that record lifecycle calls. Tests leak one instance
//! per case so parallel tests never share counters.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};

use quindar_hal::{
    DriverContext, HwDef, HwOption, SerialConfig, SerialDriver, TimerConfig, TimerDriver,
};

use std::boxed::Box;

pub(crate) struct CountingSerialDriver {
    inits: AtomicUsize,
    deinits: AtomicUsize,
    oversample8: AtomicUsize,
    onebit: AtomicUsize,
    fail_next_init: AtomicBool,
    baudrate: AtomicU32,
    next_ctx: AtomicUsize,
}

impl CountingSerialDriver {
    pub(crate) const fn new() -> Self {
        Self {
            inits: AtomicUsize::new(0),
            deinits: AtomicUsize::new(0),
            oversample8: AtomicUsize::new(0),
            onebit: AtomicUsize::new(0),
            fail_next_init: AtomicBool::new(false),
            baudrate: AtomicU32::new(0),
            next_ctx: AtomicUsize::new(1),
        }
    }

    /// A fresh instance with the `'static` lifetime descriptors need
    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::new(Self::new()))
    }

    pub(crate) fn inits(&self) -> usize {
        self.inits.load(Ordering::Relaxed)
    }

    pub(crate) fn deinits(&self) -> usize {
        self.deinits.load(Ordering::Relaxed)
    }

    pub(crate) fn oversample8_requests(&self) -> usize {
        self.oversample8.load(Ordering::Relaxed)
    }

    pub(crate) fn onebit_requests(&self) -> usize {
        self.onebit.load(Ordering::Relaxed)
    }

    /// Make the next `init` report the hardware as unavailable
    pub(crate) fn fail_next_init(&self) {
        self.fail_next_init.store(true, Ordering::Relaxed);
    }
}

impl SerialDriver for CountingSerialDriver {
    fn init(&self, _hw_def: HwDef, config: &SerialConfig) -> Option<DriverContext> {
        if self.fail_next_init.swap(false, Ordering::Relaxed) {
            return None;
        }
        self.inits.fetch_add(1, Ordering::Relaxed);
        self.baudrate.store(config.baudrate, Ordering::Relaxed);
        Some(DriverContext(self.next_ctx.fetch_add(1, Ordering::Relaxed)))
    }

    fn deinit(&self, _ctx: DriverContext) {
        self.deinits.fetch_add(1, Ordering::Relaxed);
    }

    fn send_byte(&self, _ctx: DriverContext, _byte: u8) {}

    fn send_buffer(&self, _ctx: DriverContext, _data: &[u8]) {}

    fn tx_completed(&self, _ctx: DriverContext) -> bool {
        true
    }

    fn wait_tx_completed(&self, _ctx: DriverContext) {}

    fn enable_rx(&self, _ctx: DriverContext) {}

    fn get_byte(&self, _ctx: DriverContext) -> Option<u8> {
        None
    }

    fn clear_rx_buffer(&self, _ctx: DriverContext) {}

    fn baudrate(&self, _ctx: DriverContext) -> u32 {
        self.baudrate.load(Ordering::Relaxed)
    }

    fn set_baudrate(&self, _ctx: DriverContext, baudrate: u32) {
        self.baudrate.store(baudrate, Ordering::Relaxed);
    }

    fn set_hw_option(&self, _ctx: DriverContext, option: HwOption) {
        match option {
            HwOption::Oversample8 => self.oversample8.fetch_add(1, Ordering::Relaxed),
            HwOption::OneBit => self.onebit.fetch_add(1, Ordering::Relaxed),
        };
    }
}

pub(crate) struct CountingTimerDriver {
    inits: AtomicUsize,
    deinits: AtomicUsize,
    next_ctx: AtomicUsize,
}

impl CountingTimerDriver {
    pub(crate) const fn new() -> Self {
        Self {
            inits: AtomicUsize::new(0),
            deinits: AtomicUsize::new(0),
            next_ctx: AtomicUsize::new(1),
        }
    }

    pub(crate) fn leaked() -> &'static Self {
        Box::leak(Box::new(Self::new()))
    }

    pub(crate) fn inits(&self) -> usize {
        self.inits.load(Ordering::Relaxed)
    }

    pub(crate) fn deinits(&self) -> usize {
        self.deinits.load(Ordering::Relaxed)
    }
}

impl TimerDriver for CountingTimerDriver {
    fn init(&self, _hw_def: HwDef, _config: &TimerConfig) -> Option<DriverContext> {
        self.inits.fetch_add(1, Ordering::Relaxed);
        Some(DriverContext(self.next_ctx.fetch_add(1, Ordering::Relaxed)))
    }

    fn deinit(&self, _ctx: DriverContext) {
        self.deinits.fetch_add(1, Ordering::Relaxed);
    }
}
