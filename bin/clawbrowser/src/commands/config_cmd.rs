use std::path::Path;

use super::{load_browser_config, load_resolved};

/// Show the resolved browser configuration as pretty-printed JSON.
pub fn show(config: Option<&Path>) -> anyhow::Result<()> {
    let resolved = load_resolved(config)?;
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

/// Show the browser section exactly as configured, before defaults.
pub fn raw(config: Option<&Path>) -> anyhow::Result<()> {
    let browser = load_browser_config(config)?.unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&browser)?);
    Ok(())
}
