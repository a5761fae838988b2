use clawbrowser_browser::{
    allocate_cdp_port, allocate_color, derive_default_browser_cdp_port_range,
    is_valid_profile_name, resolve_all_profiles, resolve_profile, used_colors, used_ports,
};
use std::path::Path;

use super::load_resolved;

/// List every profile with its resolved endpoint.
pub fn list(config: Option<&Path>) -> anyhow::Result<()> {
    let resolved = load_resolved(config)?;
    let profiles = resolve_all_profiles(&resolved)?;

    println!();
    println!("Browser profiles ({})", profiles.len());
    println!();
    for profile in profiles {
        let marker = if profile.name == resolved.default_profile { "*" } else { " " };
        println!(
            "{} {:<16} {:<10} {:<8} {}",
            marker,
            profile.name,
            profile.driver,
            profile.color.as_deref().unwrap_or("-"),
            profile.cdp_url,
        );
    }
    Ok(())
}

pub fn show(config: Option<&Path>, name: &str) -> anyhow::Result<()> {
    let resolved = load_resolved(config)?;
    match resolve_profile(&resolved, name)? {
        Some(profile) => {
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(())
        }
        None => anyhow::bail!("Profile not found: {}", name),
    }
}

/// Print the `browser.profiles` entry a new profile would get. Nothing is
/// written.
pub fn next(config: Option<&Path>, name: &str) -> anyhow::Result<()> {
    if !is_valid_profile_name(name) {
        anyhow::bail!(
            "Invalid profile name \"{}\": use lowercase letters, digits and hyphens (max 64)",
            name
        );
    }
    let resolved = load_resolved(config)?;
    if resolved.profiles.contains_key(name) {
        anyhow::bail!("Profile already exists: {}", name);
    }

    let range = derive_default_browser_cdp_port_range(resolved.control_port);
    let port = allocate_cdp_port(&used_ports(&resolved.profiles), range).ok_or_else(|| {
        anyhow::anyhow!("No free CDP port in {}-{}", range.start, range.end)
    })?;
    let color = allocate_color(&used_colors(&resolved.profiles));

    let entry = serde_json::json!({ name: { "cdpPort": port, "color": color } });
    println!("{}", serde_json::to_string_pretty(&entry)?);
    Ok(())
}
