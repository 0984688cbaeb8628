/// Saved palette history, stored as one JSON array under a fixed key.
use tracing::debug;

use crate::error::StoreError;
use crate::types::Palette;

use super::KeyValueStore;

pub const SAVED_PALETTES_KEY: &str = "savedPalettes";

pub struct SavedPalettes<S> {
    store: S,
}

impl<S: KeyValueStore> SavedPalettes<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All saved palettes, oldest first. A missing key is an empty history.
    pub fn load(&self) -> Result<Vec<Palette>, StoreError> {
        match self.store.get(SAVED_PALETTES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the whole history.
    pub fn save(&mut self, palettes: &[Palette]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(palettes)?;
        self.store.set(SAVED_PALETTES_KEY, &raw)
    }

    /// Appends `palette` and returns the new history length.
    pub fn append(&mut self, palette: &Palette) -> Result<usize, StoreError> {
        let mut palettes = self.load()?;
        palettes.push(palette.clone());
        self.save(&palettes)?;
        debug!(count = palettes.len(), "appended saved palette");
        Ok(palettes.len())
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }
}
