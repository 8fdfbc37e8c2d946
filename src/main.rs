mod app;
mod ui;

use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::egui;

use infographic_gallery::config::{load_config, CONFIG_FILENAME};
use infographic_gallery::net::site_root_url;

use app::GalleryApp;

/// Browse infographic animations and inspect their HTML, CSS and JavaScript.
#[derive(Parser, Debug)]
#[command(name = "infographic-gallery", version, about)]
struct Cli {
    /// Configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Site root: a directory, or an http(s)/file URL
    #[arg(long, value_name = "ROOT")]
    site_root: Option<String>,

    /// Catalog JSON, relative to the site root or absolute
    #[arg(long, value_name = "PATH")]
    catalog: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config_path = cli
        .config
        .unwrap_or_else(|| Path::new(CONFIG_FILENAME).to_path_buf());
    let mut config = load_config(&config_path);
    if let Some(root) = cli.site_root {
        config.site_root = root;
    }
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }

    let site_root = site_root_url(&config.site_root)?;
    log::info!("Site root {}, catalog {}", site_root, config.catalog);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Infographic Animation Gallery",
        options,
        Box::new(move |cc| Ok(Box::new(GalleryApp::new(cc, config, site_root)))),
    )?;
    Ok(())
}
