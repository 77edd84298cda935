//! Serial driver implementations

mod loopback;

pub use loopback::{LoopbackSerialDriver, LOOPBACK_PORTS};
