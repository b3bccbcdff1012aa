use std::collections::{BTreeSet, HashMap};

use bytes::Bytes;

use crate::store::resource_store::ResourceStore;

/// in-memory resource store, neither optimized nor particularly clever - for tests and for
///  catalogs assembled at runtime
#[derive(Default, Clone)]
pub struct TransientResourceStore {
    data: HashMap<String, Bytes>,
}
impl TransientResourceStore {
    pub fn new() -> TransientResourceStore {
        Default::default()
    }

    pub fn insert(&mut self, path: &str, data: impl Into<Bytes>) {
        self.data.insert(normalize(path), data.into());
    }

    pub fn with(mut self, path: &str, data: impl Into<Bytes>) -> TransientResourceStore {
        self.insert(path, data);
        self
    }
}

fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl ResourceStore for TransientResourceStore {
    fn get(&self, path: &str) -> anyhow::Result<Option<Bytes>> {
        Ok(self.data.get(&normalize(path)).cloned())
    }

    fn list_dirs(&self, path: &str) -> anyhow::Result<Vec<String>> {
        let mut prefix = normalize(path);
        if !prefix.is_empty() {
            prefix.push('/');
        }

        // a child is a directory iff some stored path continues below it
        let dirs: BTreeSet<&str> = self.data.keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter_map(|rest| rest.split_once('/'))
            .map(|(child, _)| child)
            .collect();

        Ok(dirs.into_iter().map(|d| d.to_string()).collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get() {
        let store = TransientResourceStore::new()
            .with("/jmix-dependencies//dependencies-default.xml", "<dependencies/>");

        assert_eq!(
            store.get("jmix-dependencies/dependencies-default.xml").unwrap(),
            Some(Bytes::from_static(b"<dependencies/>"))
        );
        assert_eq!(store.get("jmix-dependencies/dependencies-2.5.xml").unwrap(), None);
    }

    #[test]
    fn test_list_dirs() {
        let store = TransientResourceStore::new()
            .with("additional/npm/2.5.0/package-lock.json", "a")
            .with("additional/npm/2.5.5/package-lock.json", "b")
            .with("additional/npm/2.5.5/other.json", "c")
            .with("additional/npm/README", "not a bucket")
            .with("additional/npmx/2.6.0/package-lock.json", "d");

        assert_eq!(store.list_dirs("additional/npm").unwrap(), vec!["2.5.0", "2.5.5"]);
        assert_eq!(store.list_dirs("additional").unwrap(), vec!["npm", "npmx"]);
        assert!(store.list_dirs("additional/pip").unwrap().is_empty());
    }
}
