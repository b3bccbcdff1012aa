use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::DeptoolError;
use crate::maven::MavenCoordinates;

/// Group of the BPM add-on modules, which are not part of the enterprise subscription
pub const BPM_GROUP_ID: &str = "io.jmix.bpm";

/// Restricts which commercial add-ons may be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubscriptionPlan {
    #[default]
    Bpm,
    Enterprise,
}
impl SubscriptionPlan {
    pub const ALL: [SubscriptionPlan; 2] = [SubscriptionPlan::Bpm, SubscriptionPlan::Enterprise];

    pub fn id(&self) -> &'static str {
        match self {
            SubscriptionPlan::Bpm => "bpm",
            SubscriptionPlan::Enterprise => "enterprise",
        }
    }

    /// `None` for unknown ids - callers decide on a default
    pub fn from_id(id: &str) -> Option<SubscriptionPlan> {
        Self::ALL.into_iter()
            .find(|plan| plan.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn is_dependency_allowed(&self, coordinates: &MavenCoordinates) -> bool {
        match self {
            SubscriptionPlan::Bpm => true,
            SubscriptionPlan::Enterprise => coordinates.group_id.0 != BPM_GROUP_ID,
        }
    }
}

impl Display for SubscriptionPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = DeptoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionPlan::from_id(s)
            .ok_or_else(|| DeptoolError::UnknownSubscriptionPlan(s.to_string()))
    }
}
