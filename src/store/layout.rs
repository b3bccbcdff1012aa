use crate::dependency::catalog::CatalogFormat;

pub const DEFAULT_CATALOG_DIR: &str = "jmix-dependencies";
pub const DEFAULT_CATALOG_FILE_PREFIX: &str = "dependencies-";
pub const DEFAULT_ADDITIONAL_DIR: &str = "jmix-dependencies/additional";

/// Where catalogs and additional resources live inside a [ResourceStore](crate::store::ResourceStore).
///
/// The default is the layout the packaging step produces:
/// ```text
/// jmix-dependencies/dependencies-default.xml
/// jmix-dependencies/dependencies-2.5.xml
/// jmix-dependencies/dependencies-2.5.1.xml
/// jmix-dependencies/additional/npm/2.5.0/package-lock.json
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    pub catalog_dir: String,
    pub catalog_file_prefix: String,
    pub additional_dir: String,
}
impl Default for StoreLayout {
    fn default() -> Self {
        StoreLayout {
            catalog_dir: DEFAULT_CATALOG_DIR.to_string(),
            catalog_file_prefix: DEFAULT_CATALOG_FILE_PREFIX.to_string(),
            additional_dir: DEFAULT_ADDITIONAL_DIR.to_string(),
        }
    }
}
impl StoreLayout {
    pub fn catalog_path(&self, bucket_key: &str, format: CatalogFormat) -> String {
        format!(
            "{}/{}{}.{}",
            self.catalog_dir,
            self.catalog_file_prefix,
            bucket_key,
            format.extension(),
        )
    }

    /// the directory holding one sub-directory per version bucket for a dependency type
    pub fn additional_type_dir(&self, type_dir_name: &str) -> String {
        format!("{}/{}", self.additional_dir, type_dir_name)
    }

    pub fn additional_resource_path(&self, type_dir_name: &str, bucket_key: &str, resource_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.additional_type_dir(type_dir_name),
            bucket_key,
            resource_name,
        )
    }
}
