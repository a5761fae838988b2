//! Default port layout derived from the gateway port.
//!
//! The gateway owns one port; everything browser related sits at fixed
//! offsets above it so several gateways can run side by side:
//!
//! ```text
//! gateway        N        (18789 by default)
//! bridge         18790
//! control        N + 2    (18791)
//! canvas host    18793
//! CDP range      control + 9 ..= control + 108   (18800..=18899)
//! ```

pub const DEFAULT_BROWSER_CONTROL_PORT: u16 = 18791;
pub const DEFAULT_BROWSER_CDP_PORT_RANGE_START: u16 = 18800;
pub const DEFAULT_BROWSER_CDP_PORT_RANGE_END: u16 = 18899;

const CONTROL_PORT_OFFSET: u32 = 2;
const CDP_RANGE_OFFSET: u32 = 9;

/// Inclusive port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl Default for PortRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_BROWSER_CDP_PORT_RANGE_START,
            end: DEFAULT_BROWSER_CDP_PORT_RANGE_END,
        }
    }
}

fn clamp_port(port: u32, fallback: u16) -> u16 {
    match u16::try_from(port) {
        Ok(p) if p > 0 => p,
        _ => fallback,
    }
}

fn derive_port(base: u16, offset: u32, fallback: u16) -> u16 {
    clamp_port(u32::from(base) + offset, fallback)
}

pub fn derive_default_browser_control_port(gateway_port: u16) -> u16 {
    derive_port(gateway_port, CONTROL_PORT_OFFSET, DEFAULT_BROWSER_CONTROL_PORT)
}

pub fn derive_default_browser_cdp_port_range(control_port: u16) -> PortRange {
    let start = derive_port(
        control_port,
        CDP_RANGE_OFFSET,
        DEFAULT_BROWSER_CDP_PORT_RANGE_START,
    );
    let span =
        u32::from(DEFAULT_BROWSER_CDP_PORT_RANGE_END - DEFAULT_BROWSER_CDP_PORT_RANGE_START);
    let end = clamp_port(u32::from(start) + span, DEFAULT_BROWSER_CDP_PORT_RANGE_END);
    PortRange {
        start,
        end: end.max(start),
    }
}
