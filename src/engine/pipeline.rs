use std::time::Duration;

use url::Url;

use crate::dom::parser::parse_html;
use crate::error::GalleryError;
use crate::net::fetch::{fetch_url, FetchOptions};
use crate::viewer::snapshot::{SourceSnapshot, DEFAULT_SELF_MARKER};

/// An animation document, fetched and captured for the code viewer.
#[derive(Debug, Clone)]
pub struct AssetPage {
    pub url: String,
    pub title: String,
    pub snapshot: SourceSnapshot,
    pub fetch_status: u16,
}

/// Error during asset loading
#[derive(Debug)]
pub struct PageError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for PageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for PageError {}

impl PageError {
    fn new(phase: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            message: err.to_string(),
            phase,
        }
    }
}

impl From<GalleryError> for PageError {
    fn from(e: GalleryError) -> Self {
        let phase = if e.is_network() { "fetch" } else { "load" };
        Self::new(phase, e)
    }
}

/// Fetch → Content check → Parse → Snapshot
pub struct AssetPipeline {
    self_marker: String,
    timeout: Duration,
}

impl Default for AssetPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetPipeline {
    pub fn new() -> Self {
        Self {
            self_marker: DEFAULT_SELF_MARKER.to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Inline scripts containing `marker` are left out of the JS view.
    pub fn with_self_marker(mut self, marker: impl Into<String>) -> Self {
        self.self_marker = marker.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load an animation document, bypassing caches.
    pub fn load_asset(&self, url: &Url) -> Result<AssetPage, PageError> {
        let opts = FetchOptions::no_cache().with_timeout(self.timeout);
        let fetched = fetch_url(url, &opts)?;

        if !is_markup(&fetched.content_type) {
            return Err(PageError::new(
                "content-type",
                format!("{} is {}, not HTML", fetched.url, fetched.content_type),
            ));
        }

        Ok(self.process_html(&fetched.text(), &fetched.url, fetched.status))
    }

    /// Process raw HTML through the pipeline (for testing)
    pub fn process_html(&self, html: &str, url: &str, status: u16) -> AssetPage {
        let dom = parse_html(html, url);
        let snapshot = SourceSnapshot::from_root(&dom.root, &self.self_marker);
        log::debug!(
            "Captured {} ({} nodes, {} bytes css, {} bytes js)",
            url,
            dom.root.node_count(),
            snapshot.css.len(),
            snapshot.javascript.len()
        );
        AssetPage {
            url: dom.url,
            title: dom.title,
            snapshot,
            fetch_status: status,
        }
    }
}

/// Servers without a content type for `.html` still get the benefit of the
/// doubt.
fn is_markup(content_type: &str) -> bool {
    let ct = content_type.to_ascii_lowercase();
    ct.is_empty()
        || ct.contains("html")
        || ct.contains("xml")
        || ct.starts_with("text/plain")
        || ct.starts_with("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::snapshot::NO_JS;

    const ANIMATION: &str = r#"<html><head><title>Counter</title>
        <style>.n { font-size: 48px; }</style></head>
        <body><span class="n">0</span>
        <script>let n = 0; setInterval(() => n++, 10);</script>
        <script>new CodeViewer();</script></body></html>"#;

    #[test]
    fn process_html_captures_title_and_sources() {
        let page = AssetPipeline::new().process_html(ANIMATION, "file:///counter.html", 200);
        assert_eq!(page.title, "Counter");
        assert_eq!(page.fetch_status, 200);
        assert_eq!(page.snapshot.css, ".n { font-size: 48px; }");
        assert_eq!(
            page.snapshot.javascript,
            "let n = 0; setInterval(() => n++, 10);"
        );
    }

    #[test]
    fn custom_marker_changes_self_detection() {
        let page = AssetPipeline::new()
            .with_self_marker("setInterval")
            .process_html(ANIMATION, "", 200);
        assert_eq!(page.snapshot.javascript, "new CodeViewer();");

        let none = AssetPipeline::new().process_html("<p>x</p>", "", 200);
        assert_eq!(none.snapshot.javascript, NO_JS);
    }

    #[test]
    fn loads_local_asset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.html");
        std::fs::write(&path, ANIMATION).unwrap();

        let page = AssetPipeline::new()
            .load_asset(&Url::from_file_path(&path).unwrap())
            .unwrap();
        assert_eq!(page.title, "Counter");
    }

    #[test]
    fn non_html_asset_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.json");
        std::fs::write(&path, "{}").unwrap();

        let err = AssetPipeline::new()
            .load_asset(&Url::from_file_path(&path).unwrap())
            .unwrap_err();
        assert_eq!(err.phase, "content-type");
    }

    #[test]
    fn missing_asset_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("gone.html")).unwrap();
        let err = AssetPipeline::new().load_asset(&url).unwrap_err();
        assert_eq!(err.phase, "fetch");
        assert!(err.to_string().starts_with("[fetch]"));
    }
}
