//! Clipboard seam for the code viewer's copy action.

use crate::error::Result;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Manual selection-copy fallback: keeps the text around so the UI can show
/// it pre-selected for the user to copy by hand.
#[derive(Debug, Default)]
pub struct SelectionBuffer {
    pending: Option<String>,
}

impl SelectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn pending_mut(&mut self) -> Option<&mut String> {
        self.pending.as_mut()
    }

    /// Drop the text once the user dismisses the selection dialog.
    pub fn dismiss(&mut self) {
        self.pending = None;
    }
}

impl Clipboard for SelectionBuffer {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.pending = Some(text.to_string());
        Ok(())
    }
}
