//! Protocol driver contract
//!
//! RF protocol encoders sit on top of the port layer: on init they bind
//! the ports their module needs and keep only the opaque handle; all byte
//! I/O goes through the bound driver, never to hardware directly.

use super::registry::ModulePortRegistry;
use super::state::ModuleStateHandle;

/// A protocol driving one module bay
pub trait ProtocolDriver {
    /// Bind the ports this protocol needs on `module`.
    ///
    /// `None` means the module/port combination is unavailable on this
    /// build and the protocol cannot run here.
    fn init(
        &self,
        ports: &mut ModulePortRegistry<'_>,
        module: usize,
    ) -> Option<ModuleStateHandle>;

    /// Release everything `init` bound
    fn deinit(&self, ports: &mut ModulePortRegistry<'_>, handle: ModuleStateHandle);

    /// Fetch one received byte, if any
    fn get_byte(&self, ports: &ModulePortRegistry<'_>, handle: ModuleStateHandle) -> Option<u8>;
}
