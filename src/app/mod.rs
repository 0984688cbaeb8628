mod state;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;

use crate::config::Config;
use crate::db::KeyValueStore;
use crate::export::png::{FileWatermark, WatermarkSource};
use crate::export::{ClipboardCapability, Downloads, ShareCapability};

pub use state::{App, NameField, NamePalettePopup, RandomPalettePopup};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Generator,
    Saved,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A modal message; key input is blocked until it is dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Everything the controller talks to outside its own state.
pub struct Services {
    pub store: Box<dyn KeyValueStore>,
    pub clipboard: ClipboardCapability,
    pub share: ShareCapability,
    pub downloads: Downloads,
    pub watermark: Arc<dyn WatermarkSource>,
    pub watermark_timeout: Duration,
    pub share_url: String,
}

impl Services {
    pub fn from_config(
        config: &Config,
        store: Box<dyn KeyValueStore>,
        clipboard: ClipboardCapability,
        share: ShareCapability,
    ) -> Self {
        Self {
            store,
            clipboard,
            share,
            downloads: Downloads::new(config.export_dir.clone()),
            watermark: Arc::new(FileWatermark::new(config.watermark_path.clone())),
            watermark_timeout: config.watermark_timeout(),
            share_url: config.share_url.clone(),
        }
    }
}

/// An app wired to in-memory storage and no host capabilities.
#[cfg(test)]
pub(crate) fn test_app(export_dir: &std::path::Path) -> App {
    use crate::db::MemoryStore;
    use crate::export::Capability;
    use crate::export::png::tests::SolidWatermark;

    App::new(Services {
        store: Box::new(MemoryStore::new()),
        clipboard: Capability::Unavailable("test".to_string()),
        share: Capability::Unavailable("test".to_string()),
        downloads: Downloads::new(export_dir),
        watermark: Arc::new(SolidWatermark),
        watermark_timeout: Duration::from_secs(5),
        share_url: String::new(),
    })
}
