pub mod coordinates;

pub use coordinates::{MavenArtifactId, MavenCoordinates, MavenGroupId};
