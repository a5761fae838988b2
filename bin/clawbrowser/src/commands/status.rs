use clawbrowser_browser::{resolve_profile, should_start_local_browser_server};
use std::path::Path;

use super::load_resolved;

pub fn run(config: Option<&Path>) -> anyhow::Result<()> {
    let resolved = load_resolved(config)?;

    println!("clawbrowser status");
    println!("==================");
    println!();

    println!("Enabled:   {}", if resolved.enabled { "✓" } else { "✗" });
    println!(
        "Control:   {} (from {})",
        resolved.control_url, resolved.control_url_source
    );
    println!(
        "  token:   {}",
        if resolved.control_token.is_some() { "set" } else { "none" }
    );
    println!(
        "  local:   {}",
        if should_start_local_browser_server(&resolved) {
            "✓ starts local server"
        } else {
            "✗ remote control server"
        }
    );
    println!(
        "CDP:       {}://{} {}",
        resolved.cdp_protocol,
        resolved.cdp_host,
        if resolved.cdp_is_loopback { "(loopback)" } else { "(remote)" }
    );
    println!("Color:     {}", resolved.color);
    if let Some(path) = &resolved.executable_path {
        println!("Browser:   {}", path);
    }
    println!(
        "Flags:     headless={} noSandbox={} attachOnly={}",
        resolved.headless, resolved.no_sandbox, resolved.attach_only
    );
    println!();

    match resolve_profile(&resolved, &resolved.default_profile)? {
        Some(profile) => println!(
            "Default profile: {} → {} ({})",
            profile.name, profile.cdp_url, profile.driver
        ),
        None => println!(
            "⚠ Default profile \"{}\" is not defined",
            resolved.default_profile
        ),
    }
    println!("Profiles:        {}", resolved.profiles.len());

    Ok(())
}
