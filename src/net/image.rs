//! Background thumbnail fetcher.
//!
//! Spawns a thread per thumbnail to download and decode it into an RGBA
//! buffer ready for egui texture creation. Grid cards usually share one
//! default thumbnail, so requests are de-duplicated by URL.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;
use std::time::Duration;

use url::Url;

use super::fetch::{fetch_url, FetchOptions};

/// Cards never draw thumbnails wider than this.
pub const MAX_THUMBNAIL_WIDTH: u32 = 320;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Manages background thumbnail fetching and decoding.
pub struct ImageLoader {
    pending: HashMap<String, mpsc::Receiver<Option<ImageData>>>,
    loaded: HashMap<String, ImageData>,
    failed: HashSet<String>,
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            loaded: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    /// Request a thumbnail to be fetched in the background.
    pub fn request(&mut self, url: &Url) {
        let key = url.as_str();
        if self.loaded.contains_key(key) || self.pending.contains_key(key) || self.failed.contains(key)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let url_owned = url.clone();

        std::thread::spawn(move || {
            let result = fetch_and_decode(&url_owned);
            let _ = tx.send(result);
        });

        self.pending.insert(key.to_string(), rx);
    }

    /// Poll for completed downloads. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (url, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Some(data)) => {
                    self.loaded.insert(url.clone(), data);
                    completed.push(url.clone());
                }
                Ok(None) | Err(mpsc::TryRecvError::Disconnected) => {
                    self.failed.insert(url.clone());
                    completed.push(url.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for url in completed {
            self.pending.remove(&url);
        }
    }

    /// Get a loaded thumbnail's data.
    pub fn get(&self, url: &str) -> Option<&ImageData> {
        self.loaded.get(url)
    }

    /// Get all loaded thumbnail URLs.
    pub fn loaded_urls(&self) -> Vec<String> {
        self.loaded.keys().cloned().collect()
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// Number of thumbnails still being fetched.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn fetch_and_decode(url: &Url) -> Option<ImageData> {
    let opts = FetchOptions::default()
        .with_timeout(Duration::from_secs(10))
        .with_accept("image/*");
    let fetched = match fetch_url(url, &opts) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("Thumbnail fetch failed: {}", e);
            return None;
        }
    };

    let img = match image::load_from_memory(&fetched.body) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Thumbnail decode failed for {}: {}", url, e);
            return None;
        }
    };
    Some(downscale(img.to_rgba8()))
}

fn downscale(rgba: image::RgbaImage) -> ImageData {
    let (w, h) = rgba.dimensions();
    let (w, h, pixels) = if w > MAX_THUMBNAIL_WIDTH {
        let ratio = MAX_THUMBNAIL_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized = image::imageops::resize(
            &rgba,
            MAX_THUMBNAIL_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        );
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    ImageData {
        width: w,
        height: h,
        rgba: pixels,
    }
}
