use std::sync::Arc;

use bytes::Bytes;

/// Read-only access to the packaged dependency data: catalog documents and the version-named
///  directory tree of additional resources.
///
/// Paths are relative and '/' separated, e.g. "jmix-dependencies/dependencies-2.5.xml".
pub trait ResourceStore: Send + Sync {
    /// `Ok(None)` if there is no resource at `path`. A resource that exists but can not be read
    ///  is an error.
    fn get(&self, path: &str) -> anyhow::Result<Option<Bytes>>;

    /// Names of the immediate child directories of `path`, in no particular order. A directory
    ///  that does not exist has no children.
    fn list_dirs(&self, path: &str) -> anyhow::Result<Vec<String>>;
}

impl <S: ResourceStore + ?Sized> ResourceStore for Arc<S> {
    fn get(&self, path: &str) -> anyhow::Result<Option<Bytes>> {
        (**self).get(path)
    }

    fn list_dirs(&self, path: &str) -> anyhow::Result<Vec<String>> {
        (**self).list_dirs(path)
    }
}
