pub mod config_cmd;
pub mod profiles;
pub mod status;

use clawbrowser_browser::{resolve_browser_config, ResolvedBrowserConfig};
use clawbrowser_core::{BrowserConfig, Config, Paths};
use std::path::Path;

/// Load the browser section from `path`, or from the default config file.
pub fn load_browser_config(path: Option<&Path>) -> anyhow::Result<Option<BrowserConfig>> {
    let config = match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "Loading config");
            Config::load(p)?
        }
        None => Config::load_or_default(&Paths::new())?,
    };
    Ok(config.browser)
}

pub fn load_resolved(path: Option<&Path>) -> anyhow::Result<ResolvedBrowserConfig> {
    let browser = load_browser_config(path)?;
    Ok(resolve_browser_config(browser.as_ref())?)
}
