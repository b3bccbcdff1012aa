use bytes::Bytes;
use tracing::{debug, trace};

use crate::store::{ResourceStore, StoreLayout};
use crate::version::{has_patch, minor_version, sort_descending, JmixVersion};

/// Kinds of additional resources, each with its own directory of version buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditionalDependencyType {
    Npm,
}
impl AdditionalDependencyType {
    pub fn directory_name(&self) -> &'static str {
        match self {
            AdditionalDependencyType::Npm => "npm",
        }
    }
}

/// Well-known additional resource files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdditionalDependencyFile {
    /// baseline lockfile copied into the npm resolution project
    PackageLock,
}
impl AdditionalDependencyFile {
    pub fn dependency_type(&self) -> AdditionalDependencyType {
        match self {
            AdditionalDependencyFile::PackageLock => AdditionalDependencyType::Npm,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            AdditionalDependencyFile::PackageLock => "package-lock.json",
        }
    }

    pub fn find_content<S: ResourceStore>(&self, resolver: &AdditionalResourceResolver<S>, jmix_version: &str) -> anyhow::Result<Option<Bytes>> {
        resolver.find(self.dependency_type(), jmix_version, self.file_name())
    }
}

/// Finds the stored additional resource that is the closest match for a framework version.
///
/// For a release, RC or otherwise qualified version "x.y.z" the existing buckets "x.y.p" with
///  p <= z are tried from the highest patch down, then the minor bucket "x.y".
///
/// For a snapshot, or a version without a patch part, the newest existing bucket of the minor
///  line is used.
pub struct AdditionalResourceResolver<S: ResourceStore> {
    store: S,
    layout: StoreLayout,
}
impl <S: ResourceStore> AdditionalResourceResolver<S> {
    pub fn new(store: S) -> AdditionalResourceResolver<S> {
        Self::with_layout(store, StoreLayout::default())
    }

    pub fn with_layout(store: S, layout: StoreLayout) -> AdditionalResourceResolver<S> {
        AdditionalResourceResolver {
            store,
            layout,
        }
    }

    /// `Ok(None)` means that no additional resource applies to this version.
    ///
    /// Fails for strings that have a patch part but are no valid version, e.g. "1.2.3b"
    pub fn find(&self, dependency_type: AdditionalDependencyType, jmix_version: &str, resource_name: &str) -> anyhow::Result<Option<Bytes>> {
        let jmix_version = jmix_version.trim();
        if jmix_version.is_empty() {
            return Ok(None);
        }

        if has_patch(jmix_version) {
            let version = JmixVersion::parse(jmix_version)?;
            if version.is_snapshot() {
                self.find_newest_in_minor(dependency_type, &version.minor_key(), resource_name)
            }
            else {
                self.find_descending_patches(dependency_type, &version, resource_name)
            }
        }
        else {
            match minor_version(jmix_version) {
                Some(minor) => self.find_newest_in_minor(dependency_type, &minor, resource_name),
                None => Ok(None),
            }
        }
    }

    fn find_descending_patches(&self, dependency_type: AdditionalDependencyType, version: &JmixVersion, resource_name: &str) -> anyhow::Result<Option<Bytes>> {
        let type_dir = self.layout.additional_type_dir(dependency_type.directory_name());

        // only existing "x.y.p" buckets with p <= patch are tried, so the walk is bounded by the
        //  directory listing rather than by the patch number
        let mut patches: Vec<u32> = self.store.list_dirs(&type_dir)?
            .iter()
            .filter_map(|bucket| patch_bucket(bucket, version))
            .filter(|patch| *patch <= version.patch)
            .collect();
        patches.sort_unstable_by(|a, b| b.cmp(a));
        patches.dedup();

        for patch in patches {
            let bucket = version.with_patch(patch).version_string(false);
            if let Some(data) = self.lookup(dependency_type, &bucket, resource_name)? {
                return Ok(Some(data));
            }
        }

        self.lookup(dependency_type, &version.minor_key(), resource_name)
    }

    fn find_newest_in_minor(&self, dependency_type: AdditionalDependencyType, minor: &str, resource_name: &str) -> anyhow::Result<Option<Bytes>> {
        let type_dir = self.layout.additional_type_dir(dependency_type.directory_name());

        let mut buckets: Vec<String> = self.store.list_dirs(&type_dir)?
            .into_iter()
            .filter(|bucket| belongs_to_minor(bucket, minor))
            .collect();
        sort_descending(&mut buckets);

        match buckets.first() {
            Some(newest) => {
                debug!("using {} bucket {} for minor version {}", dependency_type.directory_name(), newest, minor);
                self.lookup(dependency_type, newest, resource_name)
            }
            None => {
                debug!("no {} buckets for minor version {}", dependency_type.directory_name(), minor);
                Ok(None)
            }
        }
    }

    fn lookup(&self, dependency_type: AdditionalDependencyType, bucket: &str, resource_name: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.layout.additional_resource_path(dependency_type.directory_name(), bucket, resource_name);
        let result = self.store.get(&path)?;

        if result.is_some() {
            debug!("found additional resource {}", path);
        }
        else {
            trace!("no additional resource at {}", path);
        }
        Ok(result)
    }
}

/// The patch number if `bucket` is exactly "major.minor.patch" of `version`'s minor line.
///  Bucket names with leading zeros or suffixes ("2.5.03", "2.5.3-RC") are not patch buckets.
fn patch_bucket(bucket: &str, version: &JmixVersion) -> Option<u32> {
    let rest = bucket.strip_prefix(&version.minor_key())?
        .strip_prefix('.')?;
    let patch = rest.parse::<u32>().ok()?;

    if patch.to_string() == rest {
        Some(patch)
    }
    else {
        None
    }
}

/// "2.5", "2.5.3" and "2.5.3-RC" belong to minor "2.5", "2.50.0" does not
fn belongs_to_minor(bucket: &str, minor: &str) -> bool {
    match bucket.strip_prefix(minor) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('-'),
        None => false,
    }
}
