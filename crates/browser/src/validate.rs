//! Validation and normalization shared by the config and profile resolvers.
//!
//! URLs and ports are strict: anything unusable is an error. Colors are
//! forgiving: anything unusable becomes the default accent color.

use clawbrowser_core::{Error, Result};
use tracing::debug;
use url::Url;

use crate::constants::DEFAULT_CLAWD_BROWSER_COLOR;

/// An http(s) URL that passed validation.
#[derive(Debug, Clone)]
pub struct HttpUrl {
    pub url: Url,
    /// Explicit port, or the scheme's standard port.
    pub port: u16,
    /// String form without a trailing slash.
    pub normalized: String,
}

impl HttpUrl {
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Same URL with another port. `port` becomes the effective port even
    /// when it is the scheme default and therefore dropped from the string.
    pub fn with_port(&self, port: u16, label: &str) -> Result<HttpUrl> {
        let mut url = self.url.clone();
        url.set_port(Some(port)).map_err(|_| Error::InvalidPort {
            label: label.to_string(),
            raw: port.to_string(),
        })?;
        let normalized = normalize_url(&url);
        Ok(HttpUrl {
            url,
            port,
            normalized,
        })
    }
}

/// Port zero counts as unset, like an absent port.
pub(crate) fn effective_port(url: &Url) -> u16 {
    match url.port() {
        Some(port) if port > 0 => port,
        _ if url.scheme() == "https" => 443,
        _ => 80,
    }
}

fn normalize_url(url: &Url) -> String {
    let s = url.to_string();
    match s.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => s,
    }
}

/// Parse `raw` as an http(s) URL. `label` names the config field in errors.
pub fn parse_http_url(raw: &str, label: &str) -> Result<HttpUrl> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| match e {
        url::ParseError::InvalidPort => Error::InvalidPort {
            label: label.to_string(),
            raw: trimmed.to_string(),
        },
        source => Error::InvalidUrl {
            label: label.to_string(),
            raw: trimmed.to_string(),
            source,
        },
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::UnsupportedScheme {
            label: label.to_string(),
            scheme: url.scheme().to_string(),
        });
    }

    let port = effective_port(&url);
    let normalized = normalize_url(&url);
    Ok(HttpUrl {
        url,
        port,
        normalized,
    })
}

pub fn is_loopback_host(host: &str) -> bool {
    let h = host.trim().to_ascii_lowercase();
    matches!(
        h.as_str(),
        "localhost" | "127.0.0.1" | "0.0.0.0" | "[::1]" | "::1" | "[::]" | "::"
    )
}

/// Normalize a user supplied hex color to `#RRGGBB`, falling back to the
/// default accent color for empty or malformed input.
pub fn normalize_hex_color(raw: Option<&str>) -> String {
    let value = raw.unwrap_or_default().trim();
    if value.is_empty() {
        return DEFAULT_CLAWD_BROWSER_COLOR.to_string();
    }
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        debug!(color = %value, "Invalid browser color, using default");
        return DEFAULT_CLAWD_BROWSER_COLOR.to_string();
    }
    format!("#{}", hex.to_ascii_uppercase())
}
