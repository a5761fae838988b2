use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::paths::Paths;

/// How a browser profile is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileDriver {
    /// Direct CDP connection to a browser managed by clawd.
    #[default]
    Clawd,
    /// Through the Chrome extension relay.
    Extension,
}

impl ProfileDriver {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileDriver::Clawd => "clawd",
            ProfileDriver::Extension => "extension",
        }
    }
}

impl fmt::Display for ProfileDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `browser.profiles`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserProfileConfig {
    /// CDP port for this profile. Allocated once at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdp_port: Option<u16>,
    /// CDP URL for this profile (remote Chrome).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdp_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver: Option<ProfileDriver>,
    /// Hex color. Auto-assigned at creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The `browser` section as written by the user. Every field is optional;
/// see `clawbrowser_browser::resolve_browser_config` for the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowserConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Base URL of the browser control server. Default: http://127.0.0.1:18791
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_url: Option<String>,
    /// Shared bearer token for the control server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_token: Option<String>,
    /// Base URL of the CDP endpoint. Default: controlUrl with port + 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cdp_url: Option<String>,
    /// Accent color for the clawd profile. Default: #FF4500
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headless: Option<bool>,
    /// Pass --no-sandbox to Chrome (Linux containers).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_sandbox: Option<bool>,
    /// Never launch; only attach to an already running browser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<BTreeMap<String, BrowserProfileConfig>>,
}

/// Top-level configuration file. Only the browser section is interpreted;
/// unknown keys are ignored so the file can be shared with other tools.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<BrowserConfig>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(paths: &Paths) -> Result<Self> {
        let config_path = paths.config_file();
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_browser_section_camel_case() {
        let raw = r##"{
  "browser": {
    "controlUrl": "http://127.0.0.1:19000",
    "attachOnly": true,
    "profiles": {
      "work": { "cdpPort": 18801, "color": "#0066CC" },
      "relay": { "cdpUrl": "http://127.0.0.1:18792", "driver": "extension" }
    }
  },
  "gateway": { "port": 18789 }
}"##;
        let cfg: Config = serde_json::from_str(raw).unwrap();
        let browser = cfg.browser.unwrap();
        assert_eq!(browser.control_url.as_deref(), Some("http://127.0.0.1:19000"));
        assert_eq!(browser.attach_only, Some(true));
        let profiles = browser.profiles.unwrap();
        assert_eq!(profiles["work"].cdp_port, Some(18801));
        assert_eq!(profiles["work"].driver, None);
        assert_eq!(profiles["relay"].driver, Some(ProfileDriver::Extension));
        assert_eq!(profiles["relay"].color, None);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_base(dir.path().to_path_buf());
        let cfg = Config::load_or_default(&paths).unwrap();
        assert!(cfg.browser.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let paths = Paths::with_base(dir.path().to_path_buf());
        std::fs::write(
            paths.config_file(),
            r#"{"browser":{"enabled":false,"color":"00aa00"}}"#,
        )
        .unwrap();

        let cfg = Config::load_or_default(&paths).unwrap();
        let browser = cfg.browser.unwrap();
        assert_eq!(browser.enabled, Some(false));
        assert_eq!(browser.color.as_deref(), Some("00aa00"));
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ browser: ").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_driver_display() {
        assert_eq!(ProfileDriver::default().to_string(), "clawd");
        assert_eq!(ProfileDriver::Extension.as_str(), "extension");
    }
}
