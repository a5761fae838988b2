//! Turns the user's `browser` section into a fully populated
//! [`ResolvedBrowserConfig`].
//!
//! Control URL precedence, first present wins:
//!
//! 1. `browser.controlUrl`
//! 2. `CLAWDBOT_BROWSER_CONTROL_URL`
//! 3. `http://127.0.0.1:{gateway + 2}` when `CLAWDBOT_GATEWAY_PORT` is set
//! 4. `http://127.0.0.1:18791`
//!
//! The profile map always ends up with a `clawd` entry and, unless its port
//! is taken, a `chrome` entry for the extension relay at `controlPort + 1`.

use std::collections::BTreeMap;
use std::fmt;

use clawbrowser_core::{BrowserConfig, BrowserProfileConfig, Error, ProfileDriver, Result};
use serde::Serialize;
use tracing::debug;

use crate::constants::{
    CHROME_EXTENSION_PROFILE_COLOR, DEFAULT_BROWSER_DEFAULT_PROFILE_NAME,
    DEFAULT_CLAWD_BROWSER_CONTROL_URL, DEFAULT_CLAWD_BROWSER_ENABLED,
    DEFAULT_CLAWD_BROWSER_PROFILE_NAME, LOOPBACK_HOST,
};
use crate::env::BrowserEnv;
use crate::port_defaults::{
    derive_default_browser_cdp_port_range, derive_default_browser_control_port,
    DEFAULT_BROWSER_CDP_PORT_RANGE_START,
};
use crate::profiles::used_ports;
use crate::validate::{is_loopback_host, normalize_hex_color, parse_http_url, HttpUrl};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CdpProtocol {
    Http,
    Https,
}

impl CdpProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            CdpProtocol::Http => "http",
            CdpProtocol::Https => "https",
        }
    }
}

impl fmt::Display for CdpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the control URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlUrlSource {
    Config,
    Env,
    GatewayPort,
    Default,
}

impl fmt::Display for ControlUrlSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ControlUrlSource::Config => "config",
            ControlUrlSource::Env => "env",
            ControlUrlSource::GatewayPort => "gateway-port",
            ControlUrlSource::Default => "default",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBrowserConfig {
    pub enabled: bool,
    pub control_url: String,
    pub control_url_source: ControlUrlSource,
    pub control_host: String,
    pub control_port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_token: Option<String>,
    pub cdp_protocol: CdpProtocol,
    pub cdp_host: String,
    pub cdp_is_loopback: bool,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,
    pub headless: bool,
    pub no_sandbox: bool,
    pub attach_only: bool,
    pub default_profile: String,
    pub profiles: BTreeMap<String, BrowserProfileConfig>,
}

type ControlUrlCandidate = fn(&BrowserConfig, &BrowserEnv) -> Option<String>;

fn control_url_from_config(cfg: &BrowserConfig, _env: &BrowserEnv) -> Option<String> {
    cfg.control_url.clone()
}

fn control_url_from_env(_cfg: &BrowserConfig, env: &BrowserEnv) -> Option<String> {
    env.control_url().map(str::to_string)
}

fn control_url_from_gateway_port(_cfg: &BrowserConfig, env: &BrowserEnv) -> Option<String> {
    let control_port = derive_default_browser_control_port(env.gateway_port()?);
    Some(format!("http://{}:{}", LOOPBACK_HOST, control_port))
}

const CONTROL_URL_CANDIDATES: [(ControlUrlSource, ControlUrlCandidate); 3] = [
    (ControlUrlSource::Config, control_url_from_config),
    (ControlUrlSource::Env, control_url_from_env),
    (ControlUrlSource::GatewayPort, control_url_from_gateway_port),
];

/// Pick the control URL by precedence, falling back to the built-in default.
/// An explicit `controlUrl` counts as present even when blank, so a blank
/// field fails validation instead of silently falling through.
pub fn select_control_url(cfg: &BrowserConfig, env: &BrowserEnv) -> (ControlUrlSource, String) {
    CONTROL_URL_CANDIDATES
        .iter()
        .find_map(|(source, candidate)| candidate(cfg, env).map(|url| (*source, url)))
        .unwrap_or_else(|| {
            (
                ControlUrlSource::Default,
                DEFAULT_CLAWD_BROWSER_CONTROL_URL.to_string(),
            )
        })
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Add the `clawd` profile when missing. Its port is, in order: the port of
/// the legacy top-level `cdpUrl`, the derived CDP range start, 18800.
pub fn ensure_default_profile(
    profiles: Option<&BTreeMap<String, BrowserProfileConfig>>,
    default_color: &str,
    legacy_cdp_port: Option<u16>,
    derived_default_cdp_port: Option<u16>,
) -> BTreeMap<String, BrowserProfileConfig> {
    let mut result = profiles.cloned().unwrap_or_default();
    if !result.contains_key(DEFAULT_CLAWD_BROWSER_PROFILE_NAME) {
        let cdp_port = legacy_cdp_port
            .or(derived_default_cdp_port)
            .unwrap_or(DEFAULT_BROWSER_CDP_PORT_RANGE_START);
        result.insert(
            DEFAULT_CLAWD_BROWSER_PROFILE_NAME.to_string(),
            BrowserProfileConfig {
                cdp_port: Some(cdp_port),
                cdp_url: None,
                driver: None,
                color: Some(default_color.to_string()),
            },
        );
    }
    result
}

/// Add the built-in `chrome` profile for the extension relay at
/// `controlPort + 1`. This is a clawd routing profile, not a Chrome user
/// profile. Skipped when the relay port is already claimed, since legacy
/// single-profile configs put the clawd CDP port there.
pub fn ensure_default_chrome_extension_profile(
    profiles: BTreeMap<String, BrowserProfileConfig>,
    control_port: u16,
) -> BTreeMap<String, BrowserProfileConfig> {
    let mut result = profiles;
    if result.contains_key(DEFAULT_BROWSER_DEFAULT_PROFILE_NAME) {
        return result;
    }
    let Some(relay_port) = control_port.checked_add(1) else {
        return result;
    };
    if used_ports(&result).contains(&relay_port) {
        debug!(port = relay_port, "Relay port already used, not adding chrome profile");
        return result;
    }
    result.insert(
        DEFAULT_BROWSER_DEFAULT_PROFILE_NAME.to_string(),
        BrowserProfileConfig {
            cdp_port: None,
            cdp_url: Some(format!("http://{}:{}", LOOPBACK_HOST, relay_port)),
            driver: Some(ProfileDriver::Extension),
            color: Some(CHROME_EXTENSION_PROFILE_COLOR.to_string()),
        },
    );
    result
}

fn derive_cdp_from_control(control: &HttpUrl) -> Result<HttpUrl> {
    let derived = u32::from(control.port) + 1;
    let port = u16::try_from(derived).map_err(|_| Error::CdpPortOverflow {
        control_port: control.port,
        derived,
    })?;
    control.with_port(port, "browser.cdpUrl")
}

/// Resolve against the current process environment.
pub fn resolve_browser_config(cfg: Option<&BrowserConfig>) -> Result<ResolvedBrowserConfig> {
    resolve_browser_config_with_env(cfg, &BrowserEnv::from_process())
}

pub fn resolve_browser_config_with_env(
    cfg: Option<&BrowserConfig>,
    env: &BrowserEnv,
) -> Result<ResolvedBrowserConfig> {
    let fallback = BrowserConfig::default();
    let cfg = cfg.unwrap_or(&fallback);

    let enabled = cfg.enabled.unwrap_or(DEFAULT_CLAWD_BROWSER_ENABLED);
    let control_token = trimmed(cfg.control_token.as_deref());

    let (control_url_source, raw_control_url) = select_control_url(cfg, env);
    debug!(source = %control_url_source, url = %raw_control_url, "Selected browser control URL");
    let control = parse_http_url(&raw_control_url, "browser.controlUrl")?;
    let control_port = control.port;
    let color = normalize_hex_color(cfg.color.as_deref());

    let derived_cdp_range = derive_default_browser_cdp_port_range(control_port);

    let raw_cdp_url = trimmed(cfg.cdp_url.as_deref());
    let cdp = match raw_cdp_url.as_deref() {
        Some(raw) => parse_http_url(raw, "browser.cdpUrl")?,
        None => derive_cdp_from_control(&control)?,
    };

    // Legacy single-profile configs put the clawd endpoint in browser.cdpUrl.
    let legacy_cdp_port = raw_cdp_url.as_ref().map(|_| cdp.port);
    let profiles = ensure_default_chrome_extension_profile(
        ensure_default_profile(
            cfg.profiles.as_ref(),
            &color,
            legacy_cdp_port,
            Some(derived_cdp_range.start),
        ),
        control_port,
    );

    let default_profile = trimmed(cfg.default_profile.as_deref()).unwrap_or_else(|| {
        if profiles.contains_key(DEFAULT_BROWSER_DEFAULT_PROFILE_NAME) {
            DEFAULT_BROWSER_DEFAULT_PROFILE_NAME.to_string()
        } else {
            DEFAULT_CLAWD_BROWSER_PROFILE_NAME.to_string()
        }
    });

    let cdp_protocol = if cdp.is_https() {
        CdpProtocol::Https
    } else {
        CdpProtocol::Http
    };
    let cdp_host = cdp.host().to_string();

    Ok(ResolvedBrowserConfig {
        enabled,
        control_host: control.host().to_string(),
        control_url: control.normalized,
        control_url_source,
        control_port,
        control_token,
        cdp_protocol,
        cdp_is_loopback: is_loopback_host(&cdp_host),
        cdp_host,
        color,
        executable_path: trimmed(cfg.executable_path.as_deref()),
        headless: cfg.headless == Some(true),
        no_sandbox: cfg.no_sandbox == Some(true),
        attach_only: cfg.attach_only == Some(true),
        default_profile,
        profiles,
    })
}
