use std::collections::HashSet;

use tracing::debug;

use crate::dependency::catalog::{CatalogBucket, DependencyCatalogLoader, DEFAULT_BUCKET};
use crate::dependency::scope::DependencyScope;
use crate::dependency::subscription_plan::SubscriptionPlan;
use crate::error::DeptoolError;
use crate::maven::MavenCoordinates;
use crate::store::{ResourceStore, StoreLayout};
use crate::version::{has_patch, minor_version, JmixVersion};

/// The coordinates that apply to a framework version. Order carries no meaning, use
///  [sorted](ResolvedDependencies::sorted) where output must be deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedDependencies {
    dependencies: HashSet<String>,
}
impl ResolvedDependencies {
    pub fn len(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    pub fn contains(&self, definition: &str) -> bool {
        self.dependencies.contains(definition)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.dependencies.iter()
    }

    pub fn sorted(&self) -> Vec<String> {
        let mut result: Vec<String> = self.dependencies.iter().cloned().collect();
        result.sort();
        result
    }

    /// Splits into (coordinates with an explicit version, coordinates without one), each sorted.
    ///  Unversioned coordinates get their version from the framework BOM and are resolved
    ///  together, versioned ones are resolved one by one.
    pub fn partition_by_version(&self) -> anyhow::Result<(Vec<String>, Vec<String>)> {
        let mut versioned = Vec::new();
        let mut unversioned = Vec::new();

        for definition in self.sorted() {
            if MavenCoordinates::parse(&definition)?.has_version() {
                versioned.push(definition);
            }
            else {
                unversioned.push(definition);
            }
        }
        Ok((versioned, unversioned))
    }

    pub fn into_set(self) -> HashSet<String> {
        self.dependencies
    }
}

impl IntoIterator for ResolvedDependencies {
    type Item = String;
    type IntoIter = std::collections::hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.dependencies.into_iter()
    }
}

/// Decides which dependency coordinates apply to a framework version.
///
/// The catalogs for the version's minor line ("2.5") and for the exact version ("2.5.1") are
///  consulted together. If neither lists an open-source dependency for the requested scope, the
///  version is treated as unlisted and the "default" catalog replaces them entirely - the two
///  levels are never merged with the default.
///
/// Commercial dependencies come from the same catalogs that supplied the open-source ones, and
///  are filtered by the subscription plan (BPM if none is given).
pub struct DependencyResolver<S: ResourceStore> {
    catalogs: DependencyCatalogLoader<S>,
}
impl <S: ResourceStore> DependencyResolver<S> {
    pub fn new(store: S) -> DependencyResolver<S> {
        Self::with_layout(store, StoreLayout::default())
    }

    pub fn with_layout(store: S, layout: StoreLayout) -> DependencyResolver<S> {
        DependencyResolver {
            catalogs: DependencyCatalogLoader::new(store, layout),
        }
    }

    pub fn resolve(
        &self,
        scope: DependencyScope,
        jmix_version: &str,
        resolve_commercial: bool,
        plan: Option<SubscriptionPlan>,
    ) -> anyhow::Result<ResolvedDependencies> {
        let jmix_version = jmix_version.trim();
        // full versions go through the parser so that "1-2-3" and "1.2.3" share the "1.2" bucket,
        //  minor_version only covers the "1.4" / "1" shorthand
        let minor = if has_patch(jmix_version) {
            JmixVersion::parse(jmix_version)?.minor_key()
        }
        else {
            minor_version(jmix_version)
                .ok_or_else(|| DeptoolError::InvalidVersionFormat(jmix_version.to_string()))?
        };

        let mut bucket_keys = vec![minor];
        if bucket_keys[0] != jmix_version {
            bucket_keys.push(jmix_version.to_string());
        }

        let version_buckets = bucket_keys.iter()
            .map(|key| self.catalogs.load(key))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut dependencies = open_source_dependencies(&version_buckets, scope);

        let consulted = if dependencies.is_empty() {
            debug!("no dependencies listed for version {} ({:?}), falling back to {}", jmix_version, bucket_keys, DEFAULT_BUCKET);
            let default_buckets = vec![self.catalogs.load(DEFAULT_BUCKET)?];
            dependencies = open_source_dependencies(&default_buckets, scope);
            default_buckets
        }
        else {
            version_buckets
        };

        if resolve_commercial {
            let plan = plan.unwrap_or_default();
            debug!("resolving commercial dependencies for subscription plan {}", plan);

            for bucket in &consulted {
                dependencies.extend(bucket.commercial_for(scope)
                    .filter(|e| plan.is_dependency_allowed(&e.coordinates))
                    .map(|e| e.definition.clone())
                );
            }
        }

        debug!("resolved {} {} dependencies for version {}", dependencies.len(), scope, jmix_version);
        Ok(ResolvedDependencies { dependencies })
    }
}

fn open_source_dependencies(buckets: &[CatalogBucket], scope: DependencyScope) -> HashSet<String> {
    buckets.iter()
        .flat_map(|bucket| bucket.open_source_for(scope))
        .map(|e| e.definition.clone())
        .collect()
}
