pub mod comparator;
pub mod jmix_version;

pub use comparator::{compare_versions, latest, sort_descending, VersionComparator};
pub use jmix_version::JmixVersion;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref VERSION_SPLIT_REGEX: Regex = Regex::new(r"[.-]").unwrap();
}

/// Splits a raw version string on '.' and '-'. Trailing empty tokens are dropped, so "1.2." has
///  two tokens, not three.
pub(crate) fn version_tokens(version: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = VERSION_SPLIT_REGEX.split(version).collect();
    while tokens.last().map_or(false, |t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

/// true if the raw string has at least major, minor and patch parts. This is checked before full
///  parsing by callers that accept both "1.4" and "1.4.2".
pub fn has_patch(version: &str) -> bool {
    if version.trim().is_empty() {
        return false;
    }
    version_tokens(version).len() > 2
}

/// Minor version of a raw version string, used as a catalog bucket key:
///  "1.4.2" -> "1.4", "2.5.999-SNAPSHOT" -> "2.5", "1-2-3" -> "1.2", "1.4" -> "1.4", "1" -> "1.0"
pub fn minor_version(version: &str) -> Option<String> {
    if version.trim().is_empty() {
        return None;
    }

    let tokens = version_tokens(version.trim());
    match tokens.as_slice() {
        [] => None,
        [major] => Some(format!("{}.0", major)),
        [major, minor, ..] => Some(format!("{}.{}", major, minor)),
    }
}

/// The version without its suffix, e.g. "2.5.0-SNAPSHOT" -> "2.5.0". Strings without a suffix
///  are returned unchanged.
pub fn stable_version(version: &str) -> Option<String> {
    if version.trim().is_empty() {
        return None;
    }

    match version.split_once('-') {
        Some((stable, suffix)) if !suffix.is_empty() => {
            if stable.is_empty() {
                None
            }
            else {
                Some(stable.to_string())
            }
        }
        _ => Some(version.to_string()),
    }
}
