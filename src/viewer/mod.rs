//! Code viewer overlay state: tabs, visibility, fullscreen modal, copy and
//! download, and highlighting of the visible block.
//!
//! The viewer holds a [`SourceSnapshot`] taken when it was created. All
//! interaction flows through [`CodeViewer::handle`]; copy and download are
//! separate because they touch the outside world.

pub mod clipboard;
pub mod download;
pub mod snapshot;

use std::borrow::Cow;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;
use crate::highlight::{Highlighter, Language, Span};
use clipboard::Clipboard;
use snapshot::SourceSnapshot;

/// How long the "copied" confirmation stays up.
pub const COPIED_FOR: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Html,
    Css,
    Javascript,
    All,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Html, Tab::Css, Tab::Javascript, Tab::All];

    pub fn label(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Javascript => "JavaScript",
            Self::All => "All",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Html | Self::All => "html",
            Self::Css => "css",
            Self::Javascript => "js",
        }
    }

    /// The combined view is highlighted as markup.
    pub fn language(self) -> Language {
        match self {
            Self::Html | Self::All => Language::Html,
            Self::Css => Language::Css,
            Self::Javascript => Language::Javascript,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn offset(self, step: isize) -> Tab {
        let len = Self::ALL.len() as isize;
        let i = (self.index() as isize + step).rem_euclid(len);
        Self::ALL[i as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    ActivateTab(Tab),
    FocusTab(Tab),
    /// Key press while the tab strip has focus. Escape is accepted from
    /// anywhere.
    Key(Key),
    ToggleVisible,
    OpenFullscreen,
    CloseFullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

pub struct CodeViewer {
    snapshot: SourceSnapshot,
    active: Tab,
    focused: Tab,
    panel: PanelState,
    modal: ModalState,
    copied_until: Option<Instant>,
    highlighter: Option<Arc<Highlighter>>,
    highlighted: Option<(Tab, Vec<Span>)>,
}

impl CodeViewer {
    pub fn new(snapshot: SourceSnapshot) -> Self {
        Self {
            snapshot,
            active: Tab::Html,
            focused: Tab::Html,
            panel: PanelState::Closed,
            modal: ModalState::Closed,
            copied_until: None,
            highlighter: None,
            highlighted: None,
        }
    }

    pub fn snapshot(&self) -> &SourceSnapshot {
        &self.snapshot
    }

    pub fn handle(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::ActivateTab(tab) => self.activate(tab),
            ViewerEvent::FocusTab(tab) => self.focused = tab,
            ViewerEvent::Key(Key::ArrowRight) => self.focused = self.focused.offset(1),
            ViewerEvent::Key(Key::ArrowLeft) => self.focused = self.focused.offset(-1),
            ViewerEvent::Key(Key::Enter | Key::Space) => self.activate(self.focused),
            ViewerEvent::Key(Key::Escape) | ViewerEvent::CloseFullscreen => {
                self.modal = ModalState::Closed;
            }
            ViewerEvent::ToggleVisible => {
                self.panel = match self.panel {
                    PanelState::Closed => PanelState::Open,
                    PanelState::Open => PanelState::Closed,
                };
                self.refresh_highlight();
            }
            ViewerEvent::OpenFullscreen => {
                self.modal = ModalState::Open;
                self.refresh_highlight();
            }
        }
    }

    fn activate(&mut self, tab: Tab) {
        self.active = tab;
        self.focused = tab;
        self.refresh_highlight();
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn focused_tab(&self) -> Tab {
        self.focused
    }

    /// Roving tabindex: only the focused tab is reachable with Tab.
    pub fn tab_index(&self, tab: Tab) -> i32 {
        if tab == self.focused {
            0
        } else {
            -1
        }
    }

    pub fn is_selected(&self, tab: Tab) -> bool {
        tab == self.active
    }

    pub fn is_visible(&self) -> bool {
        self.panel == PanelState::Open
    }

    pub fn is_fullscreen(&self) -> bool {
        self.modal == ModalState::Open
    }

    /// Page scrolling is suspended while the modal is up.
    pub fn scroll_locked(&self) -> bool {
        self.is_fullscreen()
    }

    pub fn toggle_label(&self) -> &'static str {
        match self.panel {
            PanelState::Closed => "View code",
            PanelState::Open => "Hide code",
        }
    }

    pub fn text(&self, tab: Tab) -> Cow<'_, str> {
        self.snapshot.text(tab)
    }

    pub fn active_text(&self) -> Cow<'_, str> {
        self.text(self.active)
    }

    /// Install rules once they are available and highlight what is showing.
    pub fn set_highlighter(&mut self, highlighter: Arc<Highlighter>) {
        self.highlighter = Some(highlighter);
        self.highlighted = None;
        self.refresh_highlight();
    }

    /// Spans for the active tab, or `None` while it is shown plain.
    pub fn highlighted(&self) -> Option<&[Span]> {
        match &self.highlighted {
            Some((tab, spans)) if *tab == self.active => Some(spans),
            _ => None,
        }
    }

    fn refresh_highlight(&mut self) {
        if !self.is_visible() && !self.is_fullscreen() {
            return;
        }
        let Some(h) = &self.highlighter else {
            return;
        };
        if matches!(&self.highlighted, Some((tab, _)) if *tab == self.active) {
            return;
        }
        let spans = h.highlight(self.active.language(), &self.snapshot.text(self.active));
        self.highlighted = Some((self.active, spans));
    }

    /// Copy the active tab's text, trying `primary` then `fallback`.
    pub fn copy(
        &mut self,
        primary: &mut dyn Clipboard,
        fallback: &mut dyn Clipboard,
        now: Instant,
    ) -> Result<()> {
        let text = self.active_text().into_owned();
        match primary.write_text(&text) {
            Ok(()) => {
                self.copied_until = Some(now + COPIED_FOR);
                log::debug!("Copied {} tab ({} bytes)", self.active.label(), text.len());
                Ok(())
            }
            Err(e) => {
                log::warn!("Clipboard write failed, offering manual copy: {}", e);
                fallback.write_text(&text)?;
                self.copied_until = Some(now + COPIED_FOR);
                Ok(())
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_until.map(|t| now < t).unwrap_or(false)
    }

    pub fn copy_label(&self, now: Instant) -> &'static str {
        if self.is_copied(now) {
            "Copied!"
        } else {
            "Copy"
        }
    }

    pub fn copied_remaining(&self, now: Instant) -> Option<Duration> {
        self.copied_until
            .filter(|t| now < *t)
            .map(|t| t.saturating_duration_since(now))
    }

    pub fn download(&self, date: chrono::NaiveDate) -> download::Download {
        download::Download::for_tab(&self.snapshot, self.active, date)
    }
}
