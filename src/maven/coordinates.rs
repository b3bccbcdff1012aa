use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::DeptoolError;

const SEPARATOR: char = ':';

#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct MavenArtifactId(pub String);

#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct MavenGroupId(pub String);

/// `group:artifact[:version]` as written in the dependency catalogs. Packaging and classifier
///  segments are not supported.
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct MavenCoordinates {
    pub group_id: MavenGroupId,
    pub artifact_id: MavenArtifactId,
    pub version: Option<String>,
}
impl MavenCoordinates {
    pub fn parse(definition: &str) -> anyhow::Result<MavenCoordinates> {
        let invalid = || DeptoolError::InvalidCoordinateFormat(definition.to_string());

        let segments: Vec<&str> = definition.trim().split(SEPARATOR).collect();
        let (group_id, artifact_id, version) = match segments.as_slice() {
            [group_id, artifact_id] => (*group_id, *artifact_id, None),
            [group_id, artifact_id, version] => (*group_id, *artifact_id, Some(*version)),
            _ => return Err(invalid().into()),
        };

        if group_id.is_empty() || artifact_id.is_empty() {
            return Err(invalid().into());
        }

        Ok(MavenCoordinates {
            group_id: MavenGroupId(group_id.to_string()),
            artifact_id: MavenArtifactId(artifact_id.to_string()),
            // NB: "g:a:" is accepted as unversioned
            version: version
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string()),
        })
    }

    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }
}

impl Display for MavenCoordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.group_id.0, SEPARATOR, self.artifact_id.0)?;
        if let Some(version) = &self.version {
            write!(f, "{}{}", SEPARATOR, version)?;
        }
        Ok(())
    }
}

impl FromStr for MavenCoordinates {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MavenCoordinates::parse(s)
    }
}
