//! Platform clipboard access behind a small trait so the controller can be
//! exercised without a display server.

use arboard::Clipboard;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard, opened on first use. The handle is kept alive afterwards
/// because on X11 the copied text is served by its owner.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            self.inner = Some(Clipboard::new().map_err(|err| ClipboardError(err.to_string()))?);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError("clipboard unavailable".to_string()));
        };
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError(err.to_string()))
    }
}
