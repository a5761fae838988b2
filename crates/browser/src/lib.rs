//! Browser automation config resolution.
//!
//! [`resolve_browser_config`] turns the optional `browser` section of the
//! config file into a [`ResolvedBrowserConfig`]; [`resolve_profile`] then
//! turns one named profile of it into a CDP endpoint.

pub mod constants;
pub mod env;
pub mod port_defaults;
pub mod profile;
pub mod profiles;
pub mod resolve;
pub mod validate;

pub use env::BrowserEnv;
pub use port_defaults::{
    derive_default_browser_cdp_port_range, derive_default_browser_control_port, PortRange,
};
pub use profile::{
    resolve_all_profiles, resolve_profile, should_start_local_browser_server,
    ResolvedBrowserProfile,
};
pub use profiles::{
    allocate_cdp_port, allocate_color, is_valid_profile_name, used_colors, used_ports,
};
pub use resolve::{
    resolve_browser_config, resolve_browser_config_with_env, CdpProtocol, ControlUrlSource,
    ResolvedBrowserConfig,
};
pub use validate::{is_loopback_host, normalize_hex_color, parse_http_url, HttpUrl};
