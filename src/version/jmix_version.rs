use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::DeptoolError;
use crate::version::comparator::compare_versions;

lazy_static! {
    // major, minor and patch, followed by any number of non-empty '.' / '-' separated tokens
    static ref VERSION_REGEX: Regex = Regex::new(r"^(\d+)[.-](\d+)[.-](\d+)((?:[.-][^.-]+)*)$").unwrap();
    static ref RC_SUFFIX_REGEX: Regex = Regex::new(r"-RC\d*$").unwrap();
}

const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// A framework release version: `major.minor.patch` plus an optional suffix that keeps its
///  leading separator, e.g. "-SNAPSHOT", "-RC2" or ".1-RC".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JmixVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub suffix: String,
}
impl JmixVersion {
    pub fn parse(version: &str) -> anyhow::Result<JmixVersion> {
        let invalid = || DeptoolError::InvalidVersionFormat(version.to_string());

        let captures = VERSION_REGEX.captures(version)
            .ok_or_else(invalid)?;

        let number = |idx: usize| captures[idx].parse::<u32>()
            .map_err(|_| invalid());

        Ok(JmixVersion {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            suffix: captures[4].to_string(),
        })
    }

    pub fn with_major(&self, major: u32) -> JmixVersion {
        JmixVersion { major, ..self.clone() }
    }

    pub fn with_minor(&self, minor: u32) -> JmixVersion {
        JmixVersion { minor, ..self.clone() }
    }

    pub fn with_patch(&self, patch: u32) -> JmixVersion {
        JmixVersion { patch, ..self.clone() }
    }

    /// NB: the suffix is taken verbatim, including its leading separator
    pub fn with_suffix(&self, suffix: &str) -> JmixVersion {
        JmixVersion { suffix: suffix.to_string(), ..self.clone() }
    }

    pub fn is_snapshot(&self) -> bool {
        self.suffix.eq_ignore_ascii_case(SNAPSHOT_SUFFIX)
    }

    pub fn is_release_candidate(&self) -> bool {
        RC_SUFFIX_REGEX.is_match(&self.suffix)
    }

    pub fn is_stable(&self) -> bool {
        self.suffix.is_empty()
    }

    /// "major.minor", the key of the minor-level catalog bucket
    pub fn minor_key(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    pub fn version_string(&self, with_suffix: bool) -> String {
        if with_suffix {
            format!("{}.{}.{}{}", self.major, self.minor, self.patch, self.suffix)
        }
        else {
            format!("{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}

impl Display for JmixVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.version_string(true))
    }
}

impl FromStr for JmixVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JmixVersion::parse(s)
    }
}

impl PartialOrd for JmixVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for JmixVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        // tie-break on the raw suffix so that ordering agrees with equality, e.g. for ".01" vs ".1"
        compare_versions(Some(&self.version_string(true)), Some(&other.version_string(true)))
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}
