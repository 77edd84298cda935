//! Port matching rules
//!
//! Selects the physical port backing a requested logical port. Direct
//! hardware matches always win over the bit-banged substitution, which in
//! turn wins over the board's runtime-configured spare port: the spare is
//! a last-resort escape hatch, not a peer of real wiring.

use quindar_hal::Polarity;

use super::descriptor::{Capability, LogicalPort, ModuleDescriptor, PortDescriptor};

/// Whether `p` directly satisfies the request.
///
/// An inverted request is satisfiable when the board can flip the line or
/// the port's signalling is inverted by definition.
fn direct_match(
    p: &PortDescriptor,
    capability: Capability,
    port: LogicalPort,
    polarity: Polarity,
) -> bool {
    p.capability() == capability
        && p.port == port
        && (polarity != Polarity::Inverted
            || p.set_inverted.is_some()
            || p.port.inherently_inverted())
}

/// Whether `p` is an inverted soft-serial substitute for the request.
///
/// When no hardware UART can produce the inverted line, a bit-banged
/// inverted port may stand in: the plain external UART falls back to the
/// inverted soft serial, the telemetry UART to its inverted sibling.
fn fallback_match(
    p: &PortDescriptor,
    capability: Capability,
    port: LogicalPort,
    polarity: Polarity,
) -> bool {
    if polarity != Polarity::Inverted || p.capability() != capability {
        return false;
    }

    matches!(
        (port, p.port),
        (LogicalPort::ExternalUart, LogicalPort::SoftSerialInverted)
            | (LogicalPort::TelemetryUart, LogicalPort::TelemetryUartInverted)
    )
}

/// Scan `module`'s ports for the request, first port wins.
///
/// The full direct scan runs before any fallback scan, so a substitution
/// candidate declared early can never shadow a direct match declared late.
pub(crate) fn resolve<'a>(
    module: &'a ModuleDescriptor,
    capability: Capability,
    port: LogicalPort,
    polarity: Polarity,
    allow_fallback: bool,
) -> Option<&'a PortDescriptor> {
    if let Some(p) = module
        .ports()
        .iter()
        .find(|p| direct_match(p, capability, port, polarity))
    {
        return Some(p);
    }

    if allow_fallback {
        return module
            .ports()
            .iter()
            .find(|p| fallback_match(p, capability, port, polarity));
    }

    None
}

/// Whether the runtime-configured spare port satisfies the request.
///
/// The spare never substitutes and never inverts: exact capability and
/// port equality, normal polarity only.
pub(crate) fn extra_port_match(
    p: &PortDescriptor,
    capability: Capability,
    port: LogicalPort,
    polarity: Polarity,
) -> bool {
    polarity == Polarity::Normal && p.capability() == capability && p.port == port
}
