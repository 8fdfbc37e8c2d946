//! Gallery configuration loaded from `gallery.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "gallery.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Base for relative catalog, asset and thumbnail paths: an `http(s)://`
    /// or `file://` URL, or a local directory.
    pub site_root: String,
    pub catalog: String,
    pub request_timeout_secs: u64,
    /// `None` uses the platform download directory.
    pub download_dir: Option<PathBuf>,
    /// Optional external highlight rule document.
    pub highlight_rules: Option<String>,
    pub highlight_timeout_ms: u64,
    pub mount_delay_ms: u64,
    /// Thumbnail shown on every grid card.
    pub thumbnail: String,
    pub popular_tags: Vec<String>,
    /// Inline scripts containing this text are left out of the JS view.
    pub viewer_marker: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            site_root: ".".to_string(),
            catalog: "data.json".to_string(),
            request_timeout_secs: 15,
            download_dir: None,
            highlight_rules: None,
            highlight_timeout_ms: 3000,
            mount_delay_ms: 100,
            thumbnail: "assets/thumbnails/default.jpg".to_string(),
            popular_tags: ["chart", "counter", "dashboard", "svg", "timeline"]
                .into_iter()
                .map(String::from)
                .collect(),
            viewer_marker: "CodeViewer".to_string(),
        }
    }
}

impl GalleryConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn highlight_timeout(&self) -> Duration {
        Duration::from_millis(self.highlight_timeout_ms)
    }

    pub fn mount_delay(&self) -> Duration {
        Duration::from_millis(self.mount_delay_ms)
    }

    /// Configured download directory, else the platform one.
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir.clone().or_else(dirs::download_dir)
    }
}

/// Load configuration from `path`. A missing file means defaults; an
/// unreadable or malformed one is logged and also yields defaults.
pub fn load_config(path: &Path) -> GalleryConfig {
    if !path.exists() {
        log::debug!("No config file at {:?}, using defaults", path);
        return GalleryConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                log::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {:?}: {}", path, e);
                GalleryConfig::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {:?}: {}", path, e);
            GalleryConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILENAME));
        assert_eq!(config, GalleryConfig::default());
        assert_eq!(config.highlight_timeout(), Duration::from_secs(3));
        assert_eq!(config.mount_delay(), Duration::from_millis(100));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
site_root = "https://example.org/gallery/"
popular_tags = ["pie"]
download_dir = "/tmp/out"
"#,
        )
        .unwrap();

        let config = load_config(&path);
        assert_eq!(config.site_root, "https://example.org/gallery/");
        assert_eq!(config.popular_tags, vec!["pie".to_string()]);
        assert_eq!(config.download_dir(), Some(PathBuf::from("/tmp/out")));
        assert_eq!(config.catalog, "data.json");
        assert_eq!(config.request_timeout_secs, 15);
    }

    #[test]
    fn malformed_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "mount_delay_ms = \"soon\"").unwrap();
        assert_eq!(load_config(&path), GalleryConfig::default());
    }

    #[test]
    fn zero_timeout_is_clamped() {
        let config = GalleryConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(1));
    }
}
