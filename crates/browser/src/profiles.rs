//! Bookkeeping over the profile map: which CDP ports and colors are taken,
//! and what a new profile should get.

use std::collections::{BTreeMap, BTreeSet};

use clawbrowser_core::BrowserProfileConfig;
use url::Url;

use crate::port_defaults::PortRange;
use crate::validate::effective_port;

pub const PROFILE_COLORS: [&str; 10] = [
    "#FF4500", // orange-red (clawd default)
    "#0066CC", // blue
    "#00AA00", // green
    "#9933FF", // purple
    "#FF6699", // pink
    "#00CCCC", // cyan
    "#FF9900", // orange
    "#6666FF", // indigo
    "#CC3366", // magenta
    "#339966", // teal
];

const MAX_PROFILE_NAME_LEN: usize = 64;

/// Profile names are lowercase slugs: `[a-z0-9][a-z0-9-]*`, at most 64 chars.
pub fn is_valid_profile_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_PROFILE_NAME_LEN {
        return false;
    }
    let mut chars = name.chars();
    let first_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    first_ok && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Ports claimed by the profiles: the explicit `cdpPort`, else the port of
/// `cdpUrl`. A `cdpPort` of 0 counts as unset. URLs that do not parse claim
/// nothing.
pub fn used_ports(profiles: &BTreeMap<String, BrowserProfileConfig>) -> BTreeSet<u16> {
    let mut used = BTreeSet::new();
    for profile in profiles.values() {
        if let Some(port) = profile.cdp_port.filter(|p| *p > 0) {
            used.insert(port);
            continue;
        }
        let Some(raw) = profile.cdp_url.as_deref().map(str::trim) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        if let Ok(url) = Url::parse(raw) {
            used.insert(effective_port(&url));
        }
    }
    used
}

/// First port of `range` not in `used`.
pub fn allocate_cdp_port(used: &BTreeSet<u16>, range: PortRange) -> Option<u16> {
    if range.start == 0 || range.start > range.end {
        return None;
    }
    (range.start..=range.end).find(|port| !used.contains(port))
}

/// Uppercased colors of every profile that has one.
pub fn used_colors(profiles: &BTreeMap<String, BrowserProfileConfig>) -> BTreeSet<String> {
    profiles
        .values()
        .filter_map(|p| p.color.as_deref())
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// First palette color not yet used; once the palette is exhausted, cycle
/// through it by the number of colors in use.
pub fn allocate_color(used: &BTreeSet<String>) -> &'static str {
    PROFILE_COLORS
        .iter()
        .copied()
        .find(|color| !used.contains(*color))
        .unwrap_or(PROFILE_COLORS[used.len() % PROFILE_COLORS.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        cdp_port: Option<u16>,
        cdp_url: Option<&str>,
        color: Option<&str>,
    ) -> BrowserProfileConfig {
        BrowserProfileConfig {
            cdp_port,
            cdp_url: cdp_url.map(str::to_string),
            driver: None,
            color: color.map(str::to_string),
        }
    }

    #[test]
    fn test_profile_names() {
        assert!(is_valid_profile_name("clawd"));
        assert!(is_valid_profile_name("work-2"));
        assert!(is_valid_profile_name("9lives"));
        assert!(!is_valid_profile_name(""));
        assert!(!is_valid_profile_name("-work"));
        assert!(!is_valid_profile_name("Work"));
        assert!(!is_valid_profile_name("my profile"));
        assert!(!is_valid_profile_name(&"a".repeat(65)));
        assert!(is_valid_profile_name(&"a".repeat(64)));
    }

    #[test]
    fn test_used_ports_from_port_and_url() {
        let mut profiles = BTreeMap::new();
        profiles.insert("clawd".to_string(), profile(Some(18800), None, None));
        profiles.insert(
            "remote".to_string(),
            profile(None, Some("http://10.0.0.42:9222"), None),
        );
        profiles.insert(
            "tls".to_string(),
            profile(None, Some("https://relay.example.com"), None),
        );
        profiles.insert("broken".to_string(), profile(None, Some("::nope::"), None));
        profiles.insert("empty".to_string(), profile(None, Some("  "), None));

        let used = used_ports(&profiles);
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec![443, 9222, 18800]);
    }

    #[test]
    fn test_explicit_port_wins_over_url() {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "both".to_string(),
            profile(Some(18801), Some("http://127.0.0.1:9222"), None),
        );
        let used = used_ports(&profiles);
        assert!(used.contains(&18801));
        assert!(!used.contains(&9222));
    }

    #[test]
    fn test_zero_port_falls_through_to_url() {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "work".to_string(),
            profile(Some(0), Some("http://127.0.0.1:18792"), None),
        );
        let used = used_ports(&profiles);
        assert_eq!(used.into_iter().collect::<Vec<_>>(), vec![18792]);
    }

    #[test]
    fn test_allocate_cdp_port() {
        let range = PortRange { start: 18800, end: 18802 };
        let mut used = BTreeSet::new();
        assert_eq!(allocate_cdp_port(&used, range), Some(18800));

        used.insert(18800);
        used.insert(18801);
        assert_eq!(allocate_cdp_port(&used, range), Some(18802));

        used.insert(18802);
        assert_eq!(allocate_cdp_port(&used, range), None);

        let inverted = PortRange { start: 10, end: 5 };
        assert_eq!(allocate_cdp_port(&BTreeSet::new(), inverted), None);
    }

    #[test]
    fn test_allocate_color() {
        let mut profiles = BTreeMap::new();
        profiles.insert("clawd".to_string(), profile(Some(18800), None, Some("#ff4500")));
        let used = used_colors(&profiles);
        assert!(used.contains("#FF4500"));
        assert_eq!(allocate_color(&used), "#0066CC");

        let all: BTreeSet<String> = PROFILE_COLORS.iter().map(|c| c.to_string()).collect();
        assert_eq!(allocate_color(&all), PROFILE_COLORS[0]);

        let mut more = all.clone();
        more.insert("#123456".to_string());
        assert_eq!(allocate_color(&more), PROFILE_COLORS[1]);
    }
}
