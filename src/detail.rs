//! Content detail renderer.
//!
//! `show(id)` turns a catalog record into a [`DetailView`] and rebuilds the
//! media slot from scratch. Every rebuild bumps the slot generation, which
//! is how stale asset loads and the previous code viewer get discarded.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::{Catalog, ContentRecord, Difficulty};
use crate::error::{GalleryError, Result};
use crate::net::fetch::{cache_token, with_cache_buster};

pub const NO_MEDIA_MESSAGE: &str = "No animation file is available for this entry.";

/// Category keys that get a taller frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameCategory {
    UseCases,
    Techniques,
    Other,
}

impl FrameCategory {
    pub fn from_category(category: &str) -> Self {
        match category {
            "use-cases" => Self::UseCases,
            "techniques" => Self::Techniques,
            _ => Self::Other,
        }
    }

    /// Frame height in logical pixels.
    pub fn frame_height(self) -> u32 {
        match self {
            Self::UseCases => 600,
            Self::Techniques => 550,
            Self::Other => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaView {
    Placeholder { message: &'static str },
    /// HTML animation document, cache-busted.
    Frame {
        src: String,
        asset_url: String,
        height: u32,
        title: String,
    },
    Video { src: String },
}

impl MediaView {
    fn for_record(record: &ContentRecord, token: u128) -> Self {
        match record.video_url.as_deref() {
            None => Self::Placeholder {
                message: NO_MEDIA_MESSAGE,
            },
            Some(url) if record.is_html_animation() => Self::Frame {
                src: with_cache_buster(url, token),
                asset_url: url.to_string(),
                height: FrameCategory::from_category(&record.category).frame_height(),
                title: record.title.clone(),
            },
            Some(url) => Self::Video {
                src: url.to_string(),
            },
        }
    }
}

/// The animation container: recreated on every `show`.
#[derive(Debug, Clone)]
pub struct MediaSlot {
    pub generation: u64,
    pub view: MediaView,
    mount_at: Instant,
    mounted: bool,
}

impl MediaSlot {
    /// Frames mount after a short delay; other views are immediate.
    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.mount_at
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.mount_at.saturating_duration_since(now)
    }

    /// Whether the frame's document has been handed out for loading.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }
}

/// What the media slot needs from the caller on this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountPoll {
    /// No frame, or its document was already handed out.
    Idle,
    /// A frame is still waiting out its mount delay.
    Waiting(Duration),
    /// Load `asset_url` for the code viewer and tag the result with
    /// `generation`.
    Mount { generation: u64, asset_url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    /// `category > subcategory`
    pub category_line: String,
    pub description: String,
    pub usage: String,
    pub points: Vec<String>,
    pub learning_objectives: Vec<String>,
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
    pub duration: Option<String>,
}

impl DetailView {
    fn from_record(record: &ContentRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            category_line: format!("{} > {}", record.category, record.subcategory),
            description: record.description.clone(),
            usage: record.usage.clone(),
            points: record.points.clone(),
            learning_objectives: record.learning_objectives.clone(),
            tags: record.tags.clone(),
            difficulty: record.difficulty.clone(),
            duration: record.duration.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Welcome,
    Content(DetailView),
}

pub struct DetailRenderer {
    catalog: Arc<Catalog>,
    display: DisplayState,
    media: Option<MediaSlot>,
    generation: u64,
    mount_delay: Duration,
}

impl DetailRenderer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            display: DisplayState::Welcome,
            media: None,
            generation: 0,
            mount_delay: Duration::from_millis(100),
        }
    }

    pub fn with_mount_delay(mut self, delay: Duration) -> Self {
        self.mount_delay = delay;
        self
    }

    /// Display a record. An unknown id is logged and leaves everything as it
    /// was.
    pub fn show(&mut self, id: &str) -> Result<&DetailView> {
        self.show_at(id, Instant::now())
    }

    pub fn show_at(&mut self, id: &str, now: Instant) -> Result<&DetailView> {
        let catalog = Arc::clone(&self.catalog);
        let Some(record) = catalog.get(id) else {
            log::error!(
                "Content not found: {} ({} ids available)",
                id,
                self.catalog.len()
            );
            return Err(GalleryError::UnknownContent { id: id.to_string() });
        };

        let view = MediaView::for_record(record, cache_token());
        let mount_at = match view {
            MediaView::Frame { .. } => now + self.mount_delay,
            _ => now,
        };
        self.generation += 1;
        log::info!("Displaying '{}' (generation {})", record.title, self.generation);

        self.media = Some(MediaSlot {
            generation: self.generation,
            view,
            mount_at,
            mounted: false,
        });
        self.display = DisplayState::Content(DetailView::from_record(record));

        self.current()
            .ok_or_else(|| GalleryError::UnknownContent { id: id.to_string() })
    }

    /// The displayed record, or `None` in the welcome state.
    pub fn current(&self) -> Option<&DetailView> {
        match &self.display {
            DisplayState::Content(view) => Some(view),
            DisplayState::Welcome => None,
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn media(&self) -> Option<&MediaSlot> {
        self.media.as_ref()
    }

    /// Mount the current frame once its delay has passed. Each slot yields
    /// [`MountPoll::Mount`] exactly once.
    pub fn poll_mount(&mut self, now: Instant) -> MountPoll {
        let Some(slot) = self.media.as_mut() else {
            return MountPoll::Idle;
        };
        let asset_url = match &slot.view {
            MediaView::Frame { asset_url, .. } if !slot.mounted => asset_url.clone(),
            _ => return MountPoll::Idle,
        };
        if !slot.is_ready(now) {
            return MountPoll::Waiting(slot.remaining(now));
        }
        slot.mounted = true;
        MountPoll::Mount {
            generation: slot.generation,
            asset_url,
        }
    }

    /// Generation of the current media slot; 0 before anything is shown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a result tagged with `generation` still belongs to the slot.
    pub fn is_current(&self, generation: u64) -> bool {
        generation != 0 && generation == self.generation
    }
}
