use tracing::warn;

use crate::constants::{ENV_BROWSER_CONTROL_URL, ENV_GATEWAY_PORT};

/// Snapshot of the environment variables that influence browser config
/// resolution. Taken once per resolve call so a single resolution never sees
/// two different values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserEnv {
    /// `CLAWDBOT_BROWSER_CONTROL_URL`
    pub control_url: Option<String>,
    /// `CLAWDBOT_GATEWAY_PORT`, unparsed.
    pub gateway_port: Option<String>,
}

impl BrowserEnv {
    pub fn from_process() -> Self {
        Self {
            control_url: std::env::var(ENV_BROWSER_CONTROL_URL).ok(),
            gateway_port: std::env::var(ENV_GATEWAY_PORT).ok(),
        }
    }

    /// The control URL override. Blank counts as unset, so an exported but
    /// empty variable falls through to the gateway port or the default.
    pub fn control_url(&self) -> Option<&str> {
        self.control_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The gateway port, if the value starts with a positive integer that
    /// fits a port. Trailing garbage after the digits is ignored, so
    /// `19001abc` reads as 19001.
    pub fn gateway_port(&self) -> Option<u16> {
        let raw = self.gateway_port.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let digits_end = raw
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(raw.len());
        match raw[..digits_end].parse::<u16>() {
            Ok(port) if port > 0 => Some(port),
            _ => {
                warn!(value = %raw, "Ignoring invalid {}", ENV_GATEWAY_PORT);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_absent() {
        let env = BrowserEnv {
            control_url: Some("   ".to_string()),
            gateway_port: Some("".to_string()),
        };
        assert_eq!(env.control_url(), None);
        assert_eq!(env.gateway_port(), None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let env = BrowserEnv {
            control_url: Some(" http://10.0.0.5:18791 ".to_string()),
            gateway_port: Some(" 19001\n".to_string()),
        };
        assert_eq!(env.control_url(), Some("http://10.0.0.5:18791"));
        assert_eq!(env.gateway_port(), Some(19001));
    }

    #[test]
    fn test_invalid_gateway_port_ignored() {
        for raw in ["0", "-5", "abc", "70000", "+19001", "0x4a"] {
            let env = BrowserEnv {
                control_url: None,
                gateway_port: Some(raw.to_string()),
            };
            assert_eq!(env.gateway_port(), None, "{raw}");
        }
    }

    #[test]
    fn test_gateway_port_leading_digits() {
        for (raw, expected) in [("19001abc", 19001), ("19001.5", 19001), ("18789 ", 18789)] {
            let env = BrowserEnv {
                control_url: None,
                gateway_port: Some(raw.to_string()),
            };
            assert_eq!(env.gateway_port(), Some(expected), "{raw}");
        }
    }
}
