use std::time::{Duration, SystemTime, UNIX_EPOCH};

use url::Url;

use crate::error::{GalleryError, Result};

/// Result of fetching a resource
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub body: Vec<u8>,
    pub url: String,
    pub status: u16,
    pub content_type: String,
}

impl FetchResult {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Per-request knobs.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Attach no-cache headers and a `v=<millis>` query parameter.
    pub bypass_cache: bool,
    pub timeout: Duration,
    pub accept: &'static str,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            bypass_cache: false,
            timeout: Duration::from_secs(15),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        }
    }
}

impl FetchOptions {
    pub fn no_cache() -> Self {
        Self {
            bypass_cache: true,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }
}

/// Milliseconds since the Unix epoch, used as the cache-busting token.
pub fn cache_token() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Append `v=<token>` to a URL string, respecting an existing query.
pub fn with_cache_buster(url: &str, token: u128) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}v={}", url, sep, token)
}

/// Fetch a URL (blocking). `file://` URLs are read from disk so a local
/// checkout of the site works without a server.
pub fn fetch_url(url: &Url, opts: &FetchOptions) -> Result<FetchResult> {
    if url.scheme() == "file" {
        return read_file_url(url);
    }

    let target = if opts.bypass_cache {
        with_cache_buster(url.as_str(), cache_token())
    } else {
        url.to_string()
    };

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(
            "Mozilla/5.0 (compatible; infographic-gallery/",
            env!("CARGO_PKG_VERSION"),
            ")"
        ))
        .timeout(opts.timeout)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| GalleryError::fetch(&target, format!("Client error: {}", e)))?;

    let mut request = client.get(&target).header("Accept", opts.accept);
    if opts.bypass_cache {
        request = request
            .header("Cache-Control", "no-cache, no-store, must-revalidate")
            .header("Pragma", "no-cache")
            .header("Expires", "0");
    }

    let response = request
        .send()
        .map_err(|e| GalleryError::fetch(&target, format!("Request failed: {}", e)))?;

    let status = response.status().as_u16();
    if !response.status().is_success() {
        return Err(GalleryError::HttpStatus {
            url: target,
            status,
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let final_url = response.url().to_string();

    let body = response
        .bytes()
        .map_err(|e| GalleryError::fetch(&target, format!("Failed to read body: {}", e)))?;

    log::debug!("Fetched {} ({} bytes, HTTP {})", final_url, body.len(), status);

    Ok(FetchResult {
        body: body.to_vec(),
        url: final_url,
        status,
        content_type,
    })
}

fn read_file_url(url: &Url) -> Result<FetchResult> {
    let path = url.to_file_path().map_err(|_| GalleryError::InvalidUrl {
        url: url.to_string(),
        message: "not a local file path".into(),
    })?;

    let body = std::fs::read(&path)
        .map_err(|e| GalleryError::fetch(url.as_str(), format!("{}: {}", path.display(), e)))?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json",
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        _ => "application/octet-stream",
    };

    log::debug!("Read {} ({} bytes)", path.display(), body.len());

    Ok(FetchResult {
        body,
        url: url.to_string(),
        status: 200,
        content_type: content_type.to_string(),
    })
}
