use std::fs::{metadata, read, read_dir};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use anyhow::anyhow;
use bytes::Bytes;
use tracing::trace;

use crate::store::resource_store::ResourceStore;

/// Resources laid out as a plain directory tree below `root`. Symlinks are followed, both for
///  resource files and for bucket directories.
pub struct FsResourceStore {
    root: PathBuf,
}
impl FsResourceStore {
    pub fn new(root: impl Into<PathBuf>) -> FsResourceStore {
        FsResourceStore {
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_path(&self, path: &str) -> anyhow::Result<PathBuf> {
        let mut result = self.root.clone();

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            // only plain names - no "..", no absolute paths, no drive prefixes
            match Path::new(segment).components().collect::<Vec<_>>().as_slice() {
                [Component::Normal(_)] => result.push(segment),
                _ => return Err(anyhow!("resource path {:?} escapes the store root", path)),
            }
        }

        Ok(result)
    }
}

impl ResourceStore for FsResourceStore {
    fn get(&self, path: &str) -> anyhow::Result<Option<Bytes>> {
        let file_path = self.file_path(path)?;
        trace!("getting resource {} from {}", path, file_path.display());

        match metadata(&file_path) {
            Ok(m) if m.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        }

        let data = read(&file_path)
            .map_err(|e| anyhow!("failed to read resource {}: {}", file_path.display(), e))?;
        Ok(Some(Bytes::from(data)))
    }

    fn list_dirs(&self, path: &str) -> anyhow::Result<Vec<String>> {
        let dir_path = self.file_path(path)?;
        trace!("listing resource directories in {}", dir_path.display());

        let entries = match read_dir(&dir_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut result = Vec::new();
        for entry in entries {
            let entry = entry?;
            // follows symlinks, a linked bucket directory counts as a bucket
            if !metadata(entry.path())?.is_dir() {
                continue;
            }

            // NB: non-UTF-8 names can not be version buckets
            if let Some(name) = entry.file_name().to_str() {
                result.push(name.to_string());
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use std::fs::{create_dir_all, write};

    use tempfile::TempDir;

    use super::*;

    fn store_with_files(files: &[(&str, &str)]) -> (TempDir, FsResourceStore) {
        let dir = TempDir::new().unwrap();
        for (path, content) in files {
            let file_path = dir.path().join(path);
            create_dir_all(file_path.parent().unwrap()).unwrap();
            write(file_path, content).unwrap();
        }
        let store = FsResourceStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_get() {
        let (_dir, store) = store_with_files(&[("a/b/package-lock.json", "{}")]);

        assert_eq!(store.get("a/b/package-lock.json").unwrap(), Some(Bytes::from_static(b"{}")));
        assert_eq!(store.get("a/b/missing.json").unwrap(), None);
        assert_eq!(store.get("missing/package-lock.json").unwrap(), None);
    }

    #[test]
    fn test_get_directory_is_absent() {
        let (_dir, store) = store_with_files(&[("a/b/package-lock.json", "{}")]);
        assert_eq!(store.get("a/b").unwrap(), None);
    }

    #[test]
    fn test_list_dirs() {
        let (_dir, store) = store_with_files(&[
            ("npm/2.5.0/package-lock.json", "{}"),
            ("npm/2.5.5/package-lock.json", "{}"),
            ("npm/README", "not a bucket"),
        ]);

        let mut dirs = store.list_dirs("npm").unwrap();
        dirs.sort();
        assert_eq!(dirs, vec!["2.5.0", "2.5.5"]);
        assert!(store.list_dirs("pip").unwrap().is_empty());
    }

    #[test]
    fn test_list_dirs_of_file_fails() {
        let (_dir, store) = store_with_files(&[("npm/2.5.0/package-lock.json", "{}")]);

        // present but not a directory - a broken layout, not a missing bucket
        assert!(store.list_dirs("npm/2.5.0/package-lock.json").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_bucket_link_fails() {
        let (dir, store) = store_with_files(&[("npm/2.5.0/package-lock.json", "{}")]);
        std::os::unix::fs::symlink(dir.path().join("nowhere"), dir.path().join("npm/2.5.5")).unwrap();

        assert!(store.list_dirs("npm").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_bucket_is_listed() {
        let (dir, store) = store_with_files(&[
            ("npm/2.5.0/package-lock.json", "{}"),
            ("shared/lock/package-lock.json", "[]"),
        ]);
        std::os::unix::fs::symlink(dir.path().join("shared/lock"), dir.path().join("npm/2.5.5")).unwrap();

        let mut dirs = store.list_dirs("npm").unwrap();
        dirs.sort();
        assert_eq!(dirs, vec!["2.5.0", "2.5.5"]);
        assert_eq!(store.get("npm/2.5.5/package-lock.json").unwrap(), Some(Bytes::from_static(b"[]")));
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let (_dir, store) = store_with_files(&[]);
        assert!(store.get("../etc/passwd").is_err());
        assert!(store.list_dirs("npm/../..").is_err());
    }
}
