/// Domain errors surfaced to the user as notices.
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("Please enter a name.")]
    EmptyName,
    #[error("Please enter a palette size between 1 and {max}.")]
    InvalidNamedSize { max: usize },
    #[error("Please enter a size between {min} and {max}.")]
    InvalidRandomSize { min: usize, max: usize },
    #[error("Invalid color '{0}', expected rgb(r, g, b)")]
    InvalidColor(String),
}

#[derive(Debug, Error)]
pub enum WatermarkError {
    #[error("watermark {path} could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("watermark loader stopped before reporting a result")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export an empty palette.")]
    EmptyPalette,
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("{0}")]
    Clipboard(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] rusqlite::Error),
    #[error("saved palettes are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}
