use tracing::{debug, warn};

use crate::error::ExportError;
use crate::types::Palette;

use super::Capability;

/// Something that accepts text for the system clipboard.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

pub type ClipboardCapability = Capability<Box<dyn ClipboardSink>>;

struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        self.clipboard
            .set_text(text.to_string())
            .map_err(|err| err.to_string())
    }
}

/// Probe the system clipboard once; headless sessions come back unavailable.
pub fn detect_clipboard() -> ClipboardCapability {
    match arboard::Clipboard::new() {
        Ok(clipboard) => {
            debug!("system clipboard available");
            Capability::Available(Box::new(SystemClipboard { clipboard }))
        }
        Err(err) => {
            warn!(error = %err, "system clipboard unavailable");
            Capability::Unavailable(err.to_string())
        }
    }
}

/// Copies the palette, one color per line.
pub fn copy_palette(
    clipboard: &mut ClipboardCapability,
    palette: &Palette,
) -> Result<(), ExportError> {
    match clipboard {
        Capability::Available(sink) => sink
            .write_text(&palette.join("\n"))
            .map_err(ExportError::Clipboard),
        Capability::Unavailable(reason) => Err(ExportError::ClipboardUnavailable(reason.clone())),
    }
}
