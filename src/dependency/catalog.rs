use serde::Deserialize;
use tracing::{debug, trace};

use crate::dependency::scope::DependencyScope;
use crate::error::DeptoolError;
use crate::maven::MavenCoordinates;
use crate::store::{ResourceStore, StoreLayout};

/// Bucket key of the catalog used for versions that have no catalog of their own
pub const DEFAULT_BUCKET: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Xml,
    Json,
}
impl CatalogFormat {
    /// in lookup order
    pub const ALL: [CatalogFormat; 2] = [CatalogFormat::Xml, CatalogFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            CatalogFormat::Xml => "xml",
            CatalogFormat::Json => "json",
        }
    }
}

// Document shape, shared by both formats:
//
// <dependencies>
//     <open-source-dependencies>
//         <dependency scope="jvm">io.jmix.core:jmix-core</dependency>
//     </open-source-dependencies>
//     <commercial-dependencies>
//         <dependency>io.jmix.bpm:jmix-bpm-flowui-starter</dependency>
//     </commercial-dependencies>
// </dependencies>

#[derive(Deserialize, Default)]
struct CatalogDocument {
    #[serde(rename = "open-source-dependencies", default)]
    open_source: DependencyList,
    #[serde(rename = "commercial-dependencies", default)]
    commercial: DependencyList,
}

#[derive(Deserialize, Default)]
struct DependencyList {
    #[serde(rename = "dependency", default)]
    dependencies: Vec<RawDependency>,
}

#[derive(Deserialize)]
struct RawDependency {
    #[serde(default)]
    scope: Option<String>,
    #[serde(rename = "$value", alias = "coordinates", default)]
    definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    /// the coordinates as written in the catalog
    pub definition: String,
    pub coordinates: MavenCoordinates,
    pub scope: Option<String>,
    pub commercial: bool,
}
impl DependencyEntry {
    fn from_raw(raw: RawDependency, commercial: bool) -> anyhow::Result<DependencyEntry> {
        let definition = raw.definition.trim().to_string();
        let coordinates = MavenCoordinates::parse(&definition)?;

        Ok(DependencyEntry {
            definition,
            coordinates,
            scope: raw.scope.filter(|s| !s.trim().is_empty()),
            commercial,
        })
    }

    pub fn applies_to(&self, scope: DependencyScope) -> bool {
        scope.accepts(self.scope.as_deref())
    }
}

/// The dependency lists for one version bucket ("default", "2.5" or "2.5.1")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogBucket {
    pub key: String,
    pub open_source: Vec<DependencyEntry>,
    pub commercial: Vec<DependencyEntry>,
}
impl CatalogBucket {
    pub fn empty(key: &str) -> CatalogBucket {
        CatalogBucket {
            key: key.to_string(),
            open_source: Vec::new(),
            commercial: Vec::new(),
        }
    }

    /// Malformed documents and malformed coordinates inside them are errors: catalogs are
    ///  packaged data, not user input
    pub fn parse(key: &str, format: CatalogFormat, data: &[u8]) -> anyhow::Result<CatalogBucket> {
        let invalid = |reason: String| DeptoolError::InvalidCatalog { key: key.to_string(), reason };

        let document: CatalogDocument = match format {
            CatalogFormat::Xml => serde_xml_rs::from_reader(data)
                .map_err(|e| invalid(e.to_string()))?,
            CatalogFormat::Json => serde_json::from_slice(data)
                .map_err(|e| invalid(e.to_string()))?,
        };

        let open_source = document.open_source.dependencies.into_iter()
            .map(|raw| DependencyEntry::from_raw(raw, false))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let commercial = document.commercial.dependencies.into_iter()
            .map(|raw| DependencyEntry::from_raw(raw, true))
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CatalogBucket {
            key: key.to_string(),
            open_source,
            commercial,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.open_source.is_empty() && self.commercial.is_empty()
    }

    pub fn open_source_for(&self, scope: DependencyScope) -> impl Iterator<Item = &DependencyEntry> {
        self.open_source.iter()
            .filter(move |e| e.applies_to(scope))
    }

    pub fn commercial_for(&self, scope: DependencyScope) -> impl Iterator<Item = &DependencyEntry> {
        self.commercial.iter()
            .filter(move |e| e.applies_to(scope))
    }
}

/// Loads catalog buckets on demand. A bucket without a backing document is returned as an empty
///  bucket, that is how the resolver's cascade detects unlisted versions.
pub struct DependencyCatalogLoader<S: ResourceStore> {
    store: S,
    layout: StoreLayout,
}
impl <S: ResourceStore> DependencyCatalogLoader<S> {
    pub fn new(store: S, layout: StoreLayout) -> DependencyCatalogLoader<S> {
        DependencyCatalogLoader {
            store,
            layout,
        }
    }

    pub fn load(&self, bucket_key: &str) -> anyhow::Result<CatalogBucket> {
        for format in CatalogFormat::ALL {
            let path = self.layout.catalog_path(bucket_key, format);
            trace!("looking for dependencies file {}", path);

            if let Some(data) = self.store.get(&path)? {
                debug!("parsing dependencies file {}", path);
                return CatalogBucket::parse(bucket_key, format, &data);
            }
        }

        debug!("dependencies file for version {} not found", bucket_key);
        Ok(CatalogBucket::empty(bucket_key))
    }
}

#[cfg(test)]
mod test {
    use crate::store::TransientResourceStore;

    use super::*;

    const CATALOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dependencies>
    <open-source-dependencies>
        <dependency>io.jmix.core:jmix-core-starter</dependency>
        <dependency scope="jvm">io.jmix.flowui:jmix-flowui-starter</dependency>
        <dependency scope="npm">com.vaadin:vaadin-core:24.4.4</dependency>
    </open-source-dependencies>
    <commercial-dependencies>
        <dependency scope="JVM">io.jmix.bpm:jmix-bpm-flowui-starter</dependency>
        <dependency>io.jmix.reports:jmix-reports-flowui-starter</dependency>
    </commercial-dependencies>
</dependencies>
"#;

    fn definitions<'a>(entries: impl Iterator<Item = &'a DependencyEntry>) -> Vec<&'a str> {
        entries.map(|e| e.definition.as_str()).collect()
    }

    #[test]
    fn test_parse_xml() {
        let bucket = CatalogBucket::parse("2.5", CatalogFormat::Xml, CATALOG_XML.as_bytes()).unwrap();

        assert_eq!(bucket.key, "2.5");
        assert_eq!(bucket.open_source.len(), 3);
        assert_eq!(bucket.commercial.len(), 2);
        assert!(bucket.open_source.iter().all(|e| !e.commercial));
        assert!(bucket.commercial.iter().all(|e| e.commercial));

        let vaadin = &bucket.open_source[2];
        assert_eq!(vaadin.definition, "com.vaadin:vaadin-core:24.4.4");
        assert_eq!(vaadin.scope.as_deref(), Some("npm"));
        assert_eq!(vaadin.coordinates.version.as_deref(), Some("24.4.4"));
        assert_eq!(bucket.open_source[0].scope, None);
    }

    #[test]
    fn test_scope_filter() {
        let bucket = CatalogBucket::parse("2.5", CatalogFormat::Xml, CATALOG_XML.as_bytes()).unwrap();

        assert_eq!(
            definitions(bucket.open_source_for(DependencyScope::Jvm)),
            vec!["io.jmix.core:jmix-core-starter", "io.jmix.flowui:jmix-flowui-starter"]
        );
        assert_eq!(
            definitions(bucket.open_source_for(DependencyScope::Npm)),
            vec!["io.jmix.core:jmix-core-starter", "com.vaadin:vaadin-core:24.4.4"]
        );
        assert_eq!(bucket.open_source_for(DependencyScope::All).count(), 3);
        assert_eq!(
            definitions(bucket.commercial_for(DependencyScope::Npm)),
            vec!["io.jmix.reports:jmix-reports-flowui-starter"]
        );
        assert_eq!(bucket.commercial_for(DependencyScope::Jvm).count(), 2);
    }

    #[test]
    fn test_parse_xml_without_commercial_section() {
        let xml = "<dependencies><open-source-dependencies><dependency>a:b</dependency></open-source-dependencies></dependencies>";
        let bucket = CatalogBucket::parse("default", CatalogFormat::Xml, xml.as_bytes()).unwrap();

        assert_eq!(definitions(bucket.open_source.iter()), vec!["a:b"]);
        assert!(bucket.commercial.is_empty());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "open-source-dependencies": { "dependency": [
                { "coordinates": "io.jmix.core:jmix-core-starter" },
                { "coordinates": "com.vaadin:vaadin-core:24.4.4", "scope": "npm" }
            ]},
            "commercial-dependencies": { "dependency": [
                { "coordinates": "io.jmix.bpm:jmix-bpm-flowui-starter" }
            ]}
        }"#;
        let bucket = CatalogBucket::parse("2.5.1", CatalogFormat::Json, json.as_bytes()).unwrap();

        assert_eq!(definitions(bucket.open_source_for(DependencyScope::Jvm)), vec!["io.jmix.core:jmix-core-starter"]);
        assert_eq!(definitions(bucket.commercial.iter()), vec!["io.jmix.bpm:jmix-bpm-flowui-starter"]);
    }

    #[test]
    fn test_malformed_coordinates_fail_fast() {
        let xml = "<dependencies><commercial-dependencies><dependency>io.jmix.bpm</dependency></commercial-dependencies></dependencies>";
        let err = CatalogBucket::parse("2.5", CatalogFormat::Xml, xml.as_bytes()).unwrap_err();

        assert_eq!(
            err.downcast_ref::<DeptoolError>(),
            Some(&DeptoolError::InvalidCoordinateFormat("io.jmix.bpm".to_string()))
        );
    }

    #[test]
    fn test_malformed_document() {
        let err = CatalogBucket::parse("2.5", CatalogFormat::Json, b"{ not json").unwrap_err();
        assert!(matches!(err.downcast_ref::<DeptoolError>(), Some(DeptoolError::InvalidCatalog { key, .. }) if key == "2.5"));
    }

    #[test]
    fn test_load() {
        let store = TransientResourceStore::new()
            .with("jmix-dependencies/dependencies-2.5.xml", CATALOG_XML)
            .with("jmix-dependencies/dependencies-2.6.json", r#"{ "open-source-dependencies": { "dependency": [ { "coordinates": "a:b" } ] } }"#);
        let loader = DependencyCatalogLoader::new(store, StoreLayout::default());

        assert_eq!(loader.load("2.5").unwrap().open_source.len(), 3);
        assert_eq!(loader.load("2.6").unwrap().open_source.len(), 1);

        let missing = loader.load("1.0").unwrap();
        assert!(missing.is_empty());
        assert_eq!(missing, CatalogBucket::empty("1.0"));
    }

    #[test]
    fn test_load_prefers_xml() {
        let store = TransientResourceStore::new()
            .with("jmix-dependencies/dependencies-2.5.xml", CATALOG_XML)
            .with("jmix-dependencies/dependencies-2.5.json", "{}");
        let loader = DependencyCatalogLoader::new(store, StoreLayout::default());

        assert_eq!(loader.load("2.5").unwrap().open_source.len(), 3);
    }
}
