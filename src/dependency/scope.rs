use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::DeptoolError;

/// Which kind of build a dependency is needed for. Catalog entries without a scope tag apply to
///  every scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyScope {
    All,
    Jvm,
    Npm,
}
impl DependencyScope {
    pub fn id(&self) -> &'static str {
        match self {
            DependencyScope::All => "all",
            DependencyScope::Jvm => "jvm",
            DependencyScope::Npm => "npm",
        }
    }

    /// `tag` is the raw scope attribute of a catalog entry, matched case-insensitively
    pub fn accepts(&self, tag: Option<&str>) -> bool {
        let tag = match tag.map(str::trim) {
            None | Some("") => return true,
            Some(tag) => tag,
        };

        match self {
            DependencyScope::All => true,
            DependencyScope::Jvm | DependencyScope::Npm => self.id().eq_ignore_ascii_case(tag),
        }
    }
}

impl Display for DependencyScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for DependencyScope {
    type Err = DeptoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [DependencyScope::All, DependencyScope::Jvm, DependencyScope::Npm].into_iter()
            .find(|scope| scope.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DeptoolError::UnknownDependencyScope(s.to_string()))
    }
}
