/// Export actions: clipboard, share, JSON and image downloads.
mod clipboard;
pub mod png;
mod share;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExportError;
use crate::types::Palette;

pub use clipboard::{ClipboardCapability, copy_palette, detect_clipboard};
pub use share::{ShareCapability, ShareOutcome, detect_share, share_palette};

#[cfg(test)]
pub use clipboard::ClipboardSink;
#[cfg(test)]
pub use share::{SharePayload, ShareTarget};

pub const JSON_FILE_NAME: &str = "palette.json";
pub const IMAGE_FILE_NAME: &str = "palette_with_watermark.png";

/// A host capability detected once at startup.
pub enum Capability<H> {
    Available(H),
    Unavailable(String),
}

impl<H> Capability<H> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

/// The directory "downloads" land in.
#[derive(Clone, Debug)]
pub struct Downloads {
    dir: PathBuf,
}

impl Downloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `bytes` as `file_name`, replacing an earlier download of the same name.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(file_name);
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Write {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), "download written");
        Ok(path)
    }
}

/// Writes the palette as a JSON array of color strings.
pub fn export_json(downloads: &Downloads, palette: &Palette) -> Result<PathBuf, ExportError> {
    let json = serde_json::to_string(palette)?;
    downloads.write(JSON_FILE_NAME, json.as_bytes())
}
