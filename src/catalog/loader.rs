//! Fetches the JSON catalog, bypassing every cache layer.

use std::time::Duration;

use url::Url;

use super::Catalog;
use crate::error::Result;
use crate::net::fetch::{fetch_url, FetchOptions};

pub struct CatalogLoader {
    url: Url,
    timeout: Duration,
}

impl CatalogLoader {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch and validate the catalog, reporting the failure to the caller.
    pub fn try_load(&self) -> Result<Catalog> {
        let opts = FetchOptions::no_cache()
            .with_timeout(self.timeout)
            .with_accept("application/json");
        let fetched = fetch_url(&self.url, &opts)?;
        let catalog = Catalog::from_json(&fetched.body)?;
        log::info!("Catalog loaded: {} items from {}", catalog.len(), fetched.url);
        Ok(catalog)
    }

    /// Fetch the catalog; any failure is logged and yields an empty catalog.
    pub fn load(&self) -> Catalog {
        match self.try_load() {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load catalog from {}: {}", self.url, e);
                Catalog::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GalleryError;

    fn write_catalog(dir: &tempfile::TempDir, body: &str) -> Url {
        let path = dir.path().join("data.json");
        std::fs::write(&path, body).unwrap();
        Url::from_file_path(path).unwrap()
    }

    #[test]
    fn loads_local_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let url = write_catalog(
            &dir,
            r#"[{"id": "bar", "title": "Bar", "category": "charts"}]"#,
        );
        let catalog = CatalogLoader::new(url).load();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("bar").is_some());
    }

    #[test]
    fn parse_failure_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let url = write_catalog(&dir, "{ not json");
        let loader = CatalogLoader::new(url);
        assert!(matches!(loader.try_load(), Err(GalleryError::Json(_))));
        assert!(loader.load().is_empty());
    }

    #[test]
    fn duplicate_ids_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let url = write_catalog(
            &dir,
            r#"[{"id": "a", "title": "A", "category": "c"},
                {"id": "a", "title": "B", "category": "c"}]"#,
        );
        let loader = CatalogLoader::new(url);
        assert!(matches!(
            loader.try_load(),
            Err(GalleryError::DuplicateId { .. })
        ));
        assert!(loader.load().is_empty());
    }

    #[test]
    fn missing_resource_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("data.json")).unwrap();
        assert!(CatalogLoader::new(url).load().is_empty());
    }
}
