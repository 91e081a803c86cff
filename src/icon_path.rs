use std::path::{Path, PathBuf};

use crate::{ICON_EXTENSIONS, ICON_NAME};

pub fn resolve_default_icon_path(webform_dir: &Path) -> Option<PathBuf> {
    resolve_icon_path(webform_dir, ICON_NAME, "ico")
}

/// Looks for `name.ext` under `root`, then for the extensions that follow
/// `ext` in [`ICON_EXTENSIONS`]. An extension outside the list is probed once
/// and the whole list is tried after it.
pub fn resolve_icon_path(root: &Path, name: &str, ext: &str) -> Option<PathBuf> {
    let ext = ext.trim_start_matches('.');
    let start = ICON_EXTENSIONS
        .iter()
        .position(|candidate| *candidate == ext)
        .map(|index| index + 1)
        .unwrap_or(0);

    std::iter::once(ext)
        .chain(ICON_EXTENSIONS[start..].iter().copied())
        .map(|candidate| root.join(format!("{name}.{candidate}")))
        .find(|path| path.is_file())
}
