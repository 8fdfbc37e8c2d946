//! Download artifacts for the code viewer.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use super::snapshot::SourceSnapshot;
use super::Tab;
use crate::error::{GalleryError, Result};

const FILE_PREFIX: &str = "infographic-code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub contents: String,
}

impl Download {
    /// Raw text of a single tab, or one complete document for the "all" tab.
    pub fn for_tab(snapshot: &SourceSnapshot, tab: Tab, date: NaiveDate) -> Self {
        let base = format!("{}-{}", FILE_PREFIX, date.format("%Y-%m-%d"));
        match tab {
            Tab::All => Self {
                filename: format!("{}-complete.html", base),
                contents: snapshot.complete_document(),
            },
            single => Self {
                filename: format!("{}.{}", base, single.extension()),
                contents: snapshot.text(single).into_owned(),
            },
        }
    }

    /// Write into `dir`, falling back to `fallback` when that fails.
    pub fn save(&self, dir: Option<&Path>, fallback: &Path) -> Result<PathBuf> {
        if let Some(dir) = dir {
            match self.write_into(dir) {
                Ok(path) => return Ok(path),
                Err(e) => log::warn!("Download to {} failed, using fallback: {}", dir.display(), e),
            }
        }
        self.write_into(fallback)
    }

    fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.contents).map_err(|source| GalleryError::Write {
            path: path.clone(),
            source,
        })?;
        log::info!("Saved {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SourceSnapshot {
        SourceSnapshot {
            html: "<svg></svg>".into(),
            css: ".bar { fill: red; }".into(),
            javascript: "draw();".into(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn css_download_is_raw_css() {
        let d = Download::for_tab(&snapshot(), Tab::Css, date());
        assert_eq!(d.filename, "infographic-code-2026-10-19.css");
        assert!(d.filename.ends_with(".css"));
        assert_eq!(d.contents, ".bar { fill: red; }");
    }

    #[test]
    fn single_tab_extensions() {
        assert!(Download::for_tab(&snapshot(), Tab::Html, date())
            .filename
            .ends_with(".html"));
        let js = Download::for_tab(&snapshot(), Tab::Javascript, date());
        assert_eq!(js.filename, "infographic-code-2026-10-19.js");
        assert_eq!(js.contents, "draw();");
    }

    #[test]
    fn all_tab_downloads_complete_document() {
        let d = Download::for_tab(&snapshot(), Tab::All, date());
        assert_eq!(d.filename, "infographic-code-2026-10-19-complete.html");
        assert_eq!(d.contents, snapshot().complete_document());
    }

    #[test]
    fn saves_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let d = Download::for_tab(&snapshot(), Tab::Css, date());
        let path = d.save(Some(dir.path()), dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), ".bar { fill: red; }");
    }

    #[test]
    fn unwritable_directory_uses_fallback() {
        let fallback = tempfile::tempdir().unwrap();
        let missing = fallback.path().join("does/not/exist");
        let d = Download::for_tab(&snapshot(), Tab::Javascript, date());
        let path = d.save(Some(&missing), fallback.path()).unwrap();
        assert_eq!(path, fallback.path().join("infographic-code-2026-10-19.js"));
    }
}
