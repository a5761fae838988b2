use clawbrowser_core::{Error, ProfileDriver, Result};
use serde::Serialize;

use crate::resolve::ResolvedBrowserConfig;
use crate::validate::{is_loopback_host, parse_http_url};

/// A profile with its CDP endpoint fully determined. `cdp_port` is always
/// the port of `cdp_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBrowserProfile {
    pub name: String,
    pub cdp_port: u16,
    pub cdp_url: String,
    pub cdp_host: String,
    pub cdp_is_loopback: bool,
    pub color: Option<String>,
    pub driver: ProfileDriver,
}

/// Resolve `profile_name` against an already resolved config.
///
/// Returns `Ok(None)` for unknown names so callers can look up optional
/// profiles. A known profile with neither `cdpUrl` nor `cdpPort` is an error.
/// A bare `cdpPort` inherits protocol and host from the top-level CDP
/// endpoint, not the control endpoint.
pub fn resolve_profile(
    resolved: &ResolvedBrowserConfig,
    profile_name: &str,
) -> Result<Option<ResolvedBrowserProfile>> {
    let Some(profile) = resolved.profiles.get(profile_name) else {
        return Ok(None);
    };

    let driver = match profile.driver {
        Some(ProfileDriver::Extension) => ProfileDriver::Extension,
        _ => ProfileDriver::Clawd,
    };

    let raw_url = profile
        .cdp_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let cdp_port = profile.cdp_port.filter(|p| *p > 0);

    let (cdp_host, cdp_port, cdp_url) = match (raw_url, cdp_port) {
        (Some(raw), _) => {
            let label = format!("browser.profiles.{}.cdpUrl", profile_name);
            let parsed = parse_http_url(raw, &label)?;
            (parsed.host().to_string(), parsed.port, parsed.normalized)
        }
        (None, Some(port)) => (
            resolved.cdp_host.clone(),
            port,
            format!("{}://{}:{}", resolved.cdp_protocol, resolved.cdp_host, port),
        ),
        (None, None) => return Err(Error::UnresolvableProfile(profile_name.to_string())),
    };

    Ok(Some(ResolvedBrowserProfile {
        name: profile_name.to_string(),
        cdp_port,
        cdp_url,
        cdp_is_loopback: is_loopback_host(&cdp_host),
        cdp_host,
        color: profile.color.clone(),
        driver,
    }))
}

/// Resolve every profile in name order.
pub fn resolve_all_profiles(
    resolved: &ResolvedBrowserConfig,
) -> Result<Vec<ResolvedBrowserProfile>> {
    let mut out = Vec::with_capacity(resolved.profiles.len());
    for name in resolved.profiles.keys() {
        if let Some(profile) = resolve_profile(resolved, name)? {
            out.push(profile);
        }
    }
    Ok(out)
}

/// A local control server is only started when the control URL points at
/// this machine.
pub fn should_start_local_browser_server(resolved: &ResolvedBrowserConfig) -> bool {
    is_loopback_host(&resolved.control_host)
}
