use std::{fs, path::Path};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    name: Option<String>,
    version: Option<String>,
    description: Option<String>,
}

/// Builds the startup banner from `<app_root>/package.json`. Any read or parse
/// failure yields `None`, and startup continues without a banner.
pub fn load_banner(app_root: &Path) -> Option<String> {
    let raw = fs::read_to_string(app_root.join("package.json")).ok()?;
    let metadata: PackageMetadata = serde_json::from_str(&raw).ok()?;
    let name = metadata.name.filter(|name| !name.trim().is_empty())?;

    let mut banner = match metadata.version {
        Some(version) => format!("{name} v{version}"),
        None => name,
    };
    if let Some(description) = metadata.description.filter(|value| !value.trim().is_empty()) {
        banner.push_str(" - ");
        banner.push_str(description.trim());
    }
    Some(banner)
}

pub fn print_banner(app_root: &Path, suppress_logo: bool) {
    if suppress_logo {
        return;
    }
    if let Some(banner) = load_banner(app_root) {
        println!("{banner}");
    }
}
