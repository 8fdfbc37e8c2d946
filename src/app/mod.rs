//! `GalleryApp`: the top-level egui application state.
//!
//! This module declares the `GalleryApp` struct and its constructor.
//! Methods are split across the sibling sub-modules:
//!
//! - `navigation`: catalog, asset and highlight loading, selection, copy/download
//! - `toolbar`: search, filters, popular tags, view toggles
//! - `content`: category tree, grid, detail panel and code viewer

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::collections::HashMap;
use std::sync::{mpsc, Arc};

use eframe::egui;
use url::Url;

use infographic_gallery::catalog::Catalog;
use infographic_gallery::config::GalleryConfig;
use infographic_gallery::detail::DetailRenderer;
use infographic_gallery::engine::pipeline::{AssetPage, PageError};
use infographic_gallery::error::{GalleryError, Result};
use infographic_gallery::highlight::loader::HighlighterLoad;
use infographic_gallery::highlight::Highlighter;
use infographic_gallery::nav::grid::GridCard;
use infographic_gallery::nav::{NavigationPanel, PanelView};
use infographic_gallery::net::image::ImageLoader;
use infographic_gallery::viewer::clipboard::{Clipboard, SelectionBuffer};
use infographic_gallery::viewer::{CodeViewer, Key, ViewerEvent};

// ─── Application state ───────────────────────────────────────────────────────

pub struct GalleryApp {
    pub config: GalleryConfig,
    pub site_root: Url,
    pub catalog_rx: Option<mpsc::Receiver<Result<Catalog>>>,
    pub loading: bool,
    pub nav: NavigationPanel,
    pub detail: DetailRenderer,
    pub cards: Vec<GridCard>,
    pub search_input: String,
    // Code viewer for the current media slot
    pub viewer: Option<CodeViewer>,
    pub asset_rx: Option<mpsc::Receiver<(u64, std::result::Result<AssetPage, PageError>)>>,
    pub asset_title: Option<String>,
    pub highlight_load: Option<HighlighterLoad>,
    pub highlighter: Option<Arc<Highlighter>>,
    pub selection: SelectionBuffer,
    // Thumbnails
    pub image_loader: ImageLoader,
    pub image_textures: HashMap<String, egui::TextureHandle>,
    /// Last error, shown in the status line.
    pub status: Option<String>,
    pub dark_mode: bool,
}

impl GalleryApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: GalleryConfig, site_root: Url) -> Self {
        let catalog = Arc::new(Catalog::empty());
        let mut app = Self {
            nav: NavigationPanel::new(Arc::clone(&catalog)),
            detail: DetailRenderer::new(catalog).with_mount_delay(config.mount_delay()),
            config,
            site_root,
            catalog_rx: None,
            loading: false,
            cards: Vec::new(),
            search_input: String::new(),
            viewer: None,
            asset_rx: None,
            asset_title: None,
            highlight_load: None,
            highlighter: None,
            selection: SelectionBuffer::new(),
            image_loader: ImageLoader::new(),
            image_textures: HashMap::new(),
            status: None,
            dark_mode: cc.egui_ctx.style().visuals.dark_mode,
        };
        app.start_highlighter_load();
        app.start_catalog_load(&cc.egui_ctx);
        app
    }
}

/// Primary clipboard: the platform clipboard via egui's platform output.
pub struct EguiClipboard<'a>(pub &'a egui::Context);

impl Clipboard for EguiClipboard<'_> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Err(GalleryError::clipboard("nothing to copy"));
        }
        self.0.copy_text(text.to_string());
        Ok(())
    }
}

impl eframe::App for GalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_catalog();
        self.check_highlighter(ctx);
        self.check_media_mount(ctx);
        self.check_asset();
        self.poll_images(ctx);

        // Escape closes the fullscreen code view regardless of focus
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if let Some(viewer) = self.viewer.as_mut() {
                viewer.handle(ViewerEvent::Key(Key::Escape));
            }
        }

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, ctx);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.draw_status_line(ui);
        });

        if self.nav.view() == PanelView::Tree {
            egui::SidePanel::left("categories")
                .default_width(260.0)
                .show(ctx, |ui| {
                    self.draw_category_tree(ui, ctx);
                });
        }

        let ctx_clone = ctx.clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, &ctx_clone);
        });

        self.draw_fullscreen(ctx);
        self.draw_selection_dialog(ctx);
    }
}
