pub const DEFAULT_CLAWD_BROWSER_ENABLED: bool = true;
pub const DEFAULT_CLAWD_BROWSER_CONTROL_URL: &str = "http://127.0.0.1:18791";
pub const DEFAULT_CLAWD_BROWSER_COLOR: &str = "#FF4500";
pub const DEFAULT_CLAWD_BROWSER_PROFILE_NAME: &str = "clawd";

/// Preferred default profile when it exists: the Chrome extension relay.
pub const DEFAULT_BROWSER_DEFAULT_PROFILE_NAME: &str = "chrome";
pub const CHROME_EXTENSION_PROFILE_COLOR: &str = "#00AA00";

/// Host the synthetic relay profile and gateway-derived control URL bind to.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

pub const ENV_BROWSER_CONTROL_URL: &str = "CLAWDBOT_BROWSER_CONTROL_URL";
pub const ENV_GATEWAY_PORT: &str = "CLAWDBOT_GATEWAY_PORT";
