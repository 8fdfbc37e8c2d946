//! Loading and selection methods for `GalleryApp`.
//!
//! Covers the background catalog, asset and highlight-rule loads and their
//! per-frame polling, plus content selection and the code viewer's copy and
//! download actions.

use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use eframe::egui;

use infographic_gallery::catalog::loader::CatalogLoader;
use infographic_gallery::catalog::Catalog;
use infographic_gallery::detail::{DetailRenderer, MountPoll};
use infographic_gallery::engine::pipeline::AssetPipeline;
use infographic_gallery::highlight::loader::HighlighterLoad;
use infographic_gallery::highlight::Highlighter;
use infographic_gallery::nav::grid::build_cards;
use infographic_gallery::nav::{NavEvent, NavigationPanel};
use infographic_gallery::net::resolve_url;
use infographic_gallery::viewer::CodeViewer;

use super::{EguiClipboard, GalleryApp};

impl GalleryApp {
    /// Fetch the catalog on a background thread.
    pub fn start_catalog_load(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        let url = match resolve_url(&self.site_root, &self.config.catalog) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Bad catalog location: {}", e);
                self.status = Some(e.to_string());
                return;
            }
        };
        self.loading = true;

        let (tx, rx) = mpsc::channel();
        self.catalog_rx = Some(rx);

        let loader = CatalogLoader::new(url).with_timeout(self.config.request_timeout());
        log::info!("Loading catalog from {}", loader.url());
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = tx.send(loader.try_load());
            ctx.request_repaint();
        });
    }

    pub fn check_catalog(&mut self) {
        if let Some(rx) = &self.catalog_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(catalog) => {
                        self.status = None;
                        self.install_catalog(catalog);
                    }
                    Err(e) => {
                        log::error!("Failed to load content data: {}", e);
                        self.status = Some(format!("Content could not be loaded: {}", e));
                        self.install_catalog(Catalog::empty());
                    }
                }
                self.loading = false;
                self.catalog_rx = None;
            }
        }
    }

    fn install_catalog(&mut self, catalog: Catalog) {
        let catalog = Arc::new(catalog);
        self.cards = build_cards(&catalog, &self.config.thumbnail);
        self.nav = NavigationPanel::new(Arc::clone(&catalog));
        self.detail = DetailRenderer::new(catalog).with_mount_delay(self.config.mount_delay());
        self.search_input.clear();
        self.discard_viewer();
    }

    /// Feed one event to the navigation panel and show whatever it selects.
    pub fn apply_nav(&mut self, event: NavEvent) {
        if let Some(id) = self.nav.handle(event) {
            self.show_content(&id);
        }
    }

    pub fn show_content(&mut self, id: &str) {
        let shown = self.detail.show(id).map(|_| ());
        match shown {
            Ok(()) => self.discard_viewer(),
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// The previous media slot's viewer and in-flight asset load go away.
    fn discard_viewer(&mut self) {
        self.viewer = None;
        self.asset_rx = None;
        self.asset_title = None;
        self.selection.dismiss();
    }

    /// Once a frame mounts, fetch its document for the code viewer.
    pub fn check_media_mount(&mut self, ctx: &egui::Context) {
        let (generation, asset_url) = match self.detail.poll_mount(Instant::now()) {
            MountPoll::Idle => return,
            MountPoll::Waiting(left) => {
                ctx.request_repaint_after(left);
                return;
            }
            MountPoll::Mount {
                generation,
                asset_url,
            } => (generation, asset_url),
        };
        let url = match resolve_url(&self.site_root, &asset_url) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Bad animation location: {}", e);
                self.status = Some(e.to_string());
                return;
            }
        };

        let (tx, rx) = mpsc::channel();
        self.asset_rx = Some(rx);

        let pipeline = AssetPipeline::new()
            .with_self_marker(self.config.viewer_marker.clone())
            .with_timeout(self.config.request_timeout());
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = pipeline.load_asset(&url);
            let _ = tx.send((generation, result));
            ctx.request_repaint();
        });
    }

    pub fn check_asset(&mut self) {
        let Some(rx) = &self.asset_rx else {
            return;
        };
        let Ok((generation, result)) = rx.try_recv() else {
            return;
        };
        self.asset_rx = None;

        if !self.detail.is_current(generation) {
            log::debug!("Dropping asset for stale generation {}", generation);
            return;
        }
        match result {
            Ok(page) => {
                let mut viewer = CodeViewer::new(page.snapshot);
                if let Some(h) = &self.highlighter {
                    viewer.set_highlighter(Arc::clone(h));
                }
                self.asset_title = Some(page.title).filter(|t| !t.is_empty());
                self.viewer = Some(viewer);
            }
            Err(e) => {
                log::warn!("Animation source unavailable: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }

    /// External rules when configured, otherwise the built-in set right away.
    pub fn start_highlighter_load(&mut self) {
        let Some(rules) = self.config.highlight_rules.clone() else {
            self.highlighter = Some(Arc::new(Highlighter::basic()));
            return;
        };
        match resolve_url(&self.site_root, &rules) {
            Ok(url) => {
                self.highlight_load = Some(HighlighterLoad::spawn(
                    url,
                    self.config.highlight_timeout(),
                ));
            }
            Err(e) => {
                log::warn!("Bad highlight rule location, using built-in rules: {}", e);
                self.highlighter = Some(Arc::new(Highlighter::basic()));
            }
        }
    }

    pub fn check_highlighter(&mut self, ctx: &egui::Context) {
        let Some(load) = &self.highlight_load else {
            return;
        };
        match load.poll(Instant::now()) {
            Some(outcome) => {
                let h = Arc::clone(outcome.highlighter());
                if let Some(viewer) = self.viewer.as_mut() {
                    viewer.set_highlighter(Arc::clone(&h));
                }
                self.highlighter = Some(h);
                self.highlight_load = None;
            }
            None => ctx.request_repaint_after(Duration::from_millis(100)),
        }
    }

    /// Poll thumbnail loads and upload finished ones as textures.
    pub fn poll_images(&mut self, ctx: &egui::Context) {
        self.image_loader.poll();
        for url in self.image_loader.loaded_urls() {
            if self.image_textures.contains_key(&url) {
                continue;
            }
            if let Some(data) = self.image_loader.get(&url) {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [data.width as usize, data.height as usize],
                    &data.rgba,
                );
                let tex = ctx.load_texture(format!("thumb_{}", url), image, egui::TextureOptions::LINEAR);
                self.image_textures.insert(url, tex);
            }
        }
        if self.image_loader.pending_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    pub fn copy_code(&mut self, ctx: &egui::Context) {
        let Some(viewer) = self.viewer.as_mut() else {
            log::warn!("Copy requested with no code loaded");
            return;
        };
        let mut primary = EguiClipboard(ctx);
        if let Err(e) = viewer.copy(&mut primary, &mut self.selection, Instant::now()) {
            log::error!("Copy failed: {}", e);
            self.status = Some(e.to_string());
        }
        if let Some(left) = viewer.copied_remaining(Instant::now()) {
            ctx.request_repaint_after(left);
        }
    }

    pub fn download_code(&mut self) {
        let Some(viewer) = &self.viewer else {
            log::warn!("Download requested with no code loaded");
            return;
        };
        let download = viewer.download(chrono::Utc::now().date_naive());
        let fallback = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match download.save(self.config.download_dir().as_deref(), &fallback) {
            Ok(path) => self.status = Some(format!("Saved {}", path.display())),
            Err(e) => {
                log::error!("Download failed: {}", e);
                self.status = Some(e.to_string());
            }
        }
    }
}
