//! Background loading of an external highlight rule document, raced against
//! a deadline.

use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use url::Url;

use super::Highlighter;
use crate::error::{GalleryError, Result};
use crate::net::fetch::{fetch_url, FetchOptions};

/// How a load finished.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Arc<Highlighter>),
    /// The external rules failed or timed out; use the built-in set.
    Fallback(Arc<Highlighter>),
}

impl LoadOutcome {
    pub fn highlighter(&self) -> &Arc<Highlighter> {
        match self {
            Self::Loaded(h) | Self::Fallback(h) => h,
        }
    }
}

/// An in-flight rule load.
pub struct HighlighterLoad {
    rx: mpsc::Receiver<Result<Highlighter>>,
    deadline: Instant,
    timeout: Duration,
}

impl HighlighterLoad {
    /// Start fetching and compiling the rule document at `url`.
    pub fn spawn(url: Url, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let opts = FetchOptions::no_cache()
                .with_timeout(timeout)
                .with_accept("application/json");
            let result = fetch_url(&url, &opts).and_then(|f| Highlighter::from_json(&f.body));
            let _ = tx.send(result);
        });
        Self::from_receiver(rx, timeout)
    }

    fn from_receiver(rx: mpsc::Receiver<Result<Highlighter>>, timeout: Duration) -> Self {
        Self {
            rx,
            deadline: Instant::now() + timeout,
            timeout,
        }
    }

    /// Non-blocking check, for the UI thread. `None` while still pending.
    pub fn poll(&self, now: Instant) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(result) => Some(settle(result)),
            Err(mpsc::TryRecvError::Disconnected) => Some(settle(Err(GalleryError::fetch(
                "highlight rules",
                "loader thread exited",
            )))),
            Err(mpsc::TryRecvError::Empty) if now >= self.deadline => Some(settle(Err(
                GalleryError::Timeout {
                    what: "highlight rules".into(),
                    millis: self.timeout.as_millis() as u64,
                },
            ))),
            Err(mpsc::TryRecvError::Empty) => None,
        }
    }
}

fn settle(result: Result<Highlighter>) -> LoadOutcome {
    match result {
        Ok(h) => {
            log::info!("Highlight rules loaded");
            LoadOutcome::Loaded(Arc::new(h.or_basic()))
        }
        Err(e) => {
            log::warn!("Highlight rules unavailable, using built-in rules: {}", e);
            LoadOutcome::Fallback(Arc::new(Highlighter::basic()))
        }
    }
}
