pub mod fetch;
pub mod image;

use url::Url;

use crate::error::{GalleryError, Result};

/// Resolve a potentially relative reference against the site root.
///
/// Absolute references (with a scheme) are returned as-is; protocol-relative
/// ones get `https:`.
pub fn resolve_url(base: &Url, href: &str) -> Result<Url> {
    if href.starts_with("//") {
        return parse(&format!("https:{}", href));
    }
    if let Ok(absolute) = Url::parse(href) {
        return Ok(absolute);
    }
    base.join(href).map_err(|e| GalleryError::InvalidUrl {
        url: href.to_string(),
        message: e.to_string(),
    })
}

/// Interpret a site root given as either a URL or a local directory path.
pub fn site_root_url(root: &str) -> Result<Url> {
    if root.starts_with("http://") || root.starts_with("https://") || root.starts_with("file://") {
        let mut url = parse(root)?;
        // Url::join replaces the last segment unless the path ends in '/'
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        return Ok(url);
    }

    let path = std::path::Path::new(root);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    if !absolute.is_dir() {
        return Err(GalleryError::config(format!(
            "site root {} is not a directory",
            absolute.display()
        )));
    }
    Url::from_directory_path(&absolute).map_err(|_| GalleryError::InvalidUrl {
        url: root.to_string(),
        message: "not a usable directory path".into(),
    })
}

fn parse(s: &str) -> Result<Url> {
    Url::parse(s).map_err(|e| GalleryError::InvalidUrl {
        url: s.to_string(),
        message: e.to_string(),
    })
}
