use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyCode;
use tracing::{debug, info, warn};

use crate::color::{self, DEFAULT_RANDOM_SIZE, MAX_NAMED_SIZE, MAX_RANDOM_SIZE, MIN_RANDOM_SIZE};
use crate::db::{KeyValueStore, SavedPalettes};
use crate::error::PaletteError;
use crate::export::png::{ImageExport, WatermarkSource};
use crate::export::{
    self, ClipboardCapability, Downloads, ShareCapability, ShareOutcome, copy_palette,
    share_palette,
};
use crate::types::{Palette, PaletteSource};

use super::{AppEvent, AppView, Notice, NoticeKind, Services};

/// The top-level application state.
pub struct App {
    pub running: bool,
    pub view: AppView,
    view_history: Vec<AppView>,
    /// The one palette every action reads when it runs.
    pub palette: Option<Palette>,
    pub palette_source: Option<PaletteSource>,
    pub saved_palettes: Vec<Palette>,
    pub selected_saved_index: usize,
    pub status: Option<String>,
    /// Set when the saved history could not be read.
    pub saved_error: Option<String>,
    pub notice: Option<Notice>,
    pub name_popup: Option<NamePalettePopup>,
    pub random_popup: Option<RandomPalettePopup>,
    pub image_export: ImageExport,
    saved: SavedPalettes<Box<dyn KeyValueStore>>,
    clipboard: ClipboardCapability,
    share: ShareCapability,
    downloads: Downloads,
    watermark: Arc<dyn WatermarkSource>,
    watermark_timeout: Duration,
    share_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameField {
    Name,
    Size,
}

#[derive(Clone, Debug)]
pub struct NamePalettePopup {
    pub name: String,
    pub size: String,
    pub field: NameField,
}

#[derive(Clone, Debug)]
pub struct RandomPalettePopup {
    pub size: String,
}

impl App {
    pub fn new(services: Services) -> Self {
        Self {
            running: true,
            view: AppView::Generator,
            view_history: Vec::new(),
            palette: None,
            palette_source: None,
            saved_palettes: Vec::new(),
            selected_saved_index: 0,
            status: None,
            saved_error: None,
            notice: None,
            name_popup: None,
            random_popup: None,
            image_export: ImageExport::Idle,
            saved: SavedPalettes::new(services.store),
            clipboard: services.clipboard,
            share: services.share,
            downloads: services.downloads,
            watermark: services.watermark,
            watermark_timeout: services.watermark_timeout,
            share_url: services.share_url,
        }
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.poll_image_export(),
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    pub fn share_available(&self) -> bool {
        self.share.is_available()
    }

    pub fn clipboard_available(&self) -> bool {
        self.clipboard.is_available()
    }

    pub fn export_dir(&self) -> &std::path::Path {
        self.downloads.dir()
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.notice.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.notice = None;
            }
            return;
        }
        if self.name_popup.is_some() {
            self.handle_name_popup_key(key);
            return;
        }
        if self.random_popup.is_some() {
            self.handle_random_popup_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => {
                if self.view == AppView::Help {
                    self.go_back();
                } else {
                    self.navigate_to(AppView::Help);
                }
            }
            KeyCode::Char('n') => self.open_name_popup(),
            KeyCode::Char('r') => {
                self.random_popup = Some(RandomPalettePopup {
                    size: String::new(),
                });
            }
            KeyCode::Char('v') => {
                self.navigate_to(AppView::Saved);
                self.load_saved();
            }
            KeyCode::Char('g') => self.navigate_to(AppView::Generator),
            KeyCode::Char('c') => self.copy_current(),
            KeyCode::Char('s') => self.save_current(),
            KeyCode::Char('x') => self.share_current(),
            KeyCode::Char('j') => self.export_current_json(),
            KeyCode::Char('i') => self.export_current_image(),
            KeyCode::Up => self.move_saved_selection_up(),
            KeyCode::Down => self.move_saved_selection_down(),
            KeyCode::Enter => {
                if self.view == AppView::Saved {
                    self.restore_selected_saved();
                }
            }
            KeyCode::Esc => {
                if self.image_export.cancel() {
                    self.status = Some("Image export cancelled.".to_string());
                } else {
                    self.go_back();
                }
            }
            _ => {}
        }
    }

    fn navigate_to(&mut self, view: AppView) {
        if self.view != view {
            self.view_history.push(self.view);
            self.view = view;
        }
    }

    fn go_back(&mut self) {
        if let Some(view) = self.view_history.pop() {
            self.view = view;
        }
    }

    fn show_notice(&mut self, kind: NoticeKind, message: impl Into<String>) {
        let message = message.into();
        if kind == NoticeKind::Error {
            warn!(%message, "notice");
        }
        self.notice = Some(Notice { kind, message });
    }

    fn open_name_popup(&mut self) {
        let name = match &self.palette_source {
            Some(PaletteSource::Named { name }) => name.clone(),
            _ => String::new(),
        };
        let size = self
            .palette
            .as_ref()
            .map(|palette| palette.len())
            .unwrap_or(DEFAULT_RANDOM_SIZE);
        self.name_popup = Some(NamePalettePopup {
            name,
            size: size.to_string(),
            field: NameField::Name,
        });
    }

    fn handle_name_popup_key(&mut self, key: KeyCode) {
        let Some(popup) = self.name_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.name_popup = None,
            KeyCode::Enter => self.submit_name_popup(),
            KeyCode::Tab | KeyCode::BackTab => {
                popup.field = match popup.field {
                    NameField::Name => NameField::Size,
                    NameField::Size => NameField::Name,
                };
            }
            KeyCode::Backspace | KeyCode::Delete => match popup.field {
                NameField::Name => {
                    popup.name.pop();
                }
                NameField::Size => {
                    popup.size.pop();
                }
            },
            KeyCode::Char(ch) => {
                if ch.is_control() {
                    return;
                }
                match popup.field {
                    NameField::Name => popup.name.push(ch),
                    NameField::Size => {
                        if ch.is_ascii_digit() || ch == '-' {
                            popup.size.push(ch);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    fn submit_name_popup(&mut self) {
        let Some(popup) = self.name_popup.clone() else {
            return;
        };
        let result = popup
            .size
            .trim()
            .parse::<usize>()
            .map_err(|_| PaletteError::InvalidNamedSize {
                max: MAX_NAMED_SIZE,
            })
            .and_then(|size| color::named_palette(&popup.name, size));
        match result {
            Ok(palette) => {
                self.name_popup = None;
                self.set_palette(palette, PaletteSource::Named { name: popup.name });
            }
            Err(err) => self.show_notice(NoticeKind::Error, err.to_string()),
        }
    }

    fn handle_random_popup_key(&mut self, key: KeyCode) {
        let Some(popup) = self.random_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.random_popup = None,
            KeyCode::Enter => self.submit_random_popup(),
            KeyCode::Backspace | KeyCode::Delete => {
                popup.size.pop();
            }
            KeyCode::Char(ch) => {
                if ch.is_ascii_digit() || ch == '-' {
                    popup.size.push(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_random_popup(&mut self) {
        let Some(popup) = self.random_popup.as_ref() else {
            return;
        };
        let raw = popup.size.trim();
        let requested = if raw.is_empty() {
            Some(DEFAULT_RANDOM_SIZE)
        } else {
            raw.parse::<usize>().ok()
        };
        let size = match requested.map(color::validate_random_size) {
            Some(Ok(size)) => size,
            Some(Err(err)) => {
                self.show_notice(NoticeKind::Error, err.to_string());
                return;
            }
            None => {
                let err = PaletteError::InvalidRandomSize {
                    min: MIN_RANDOM_SIZE,
                    max: MAX_RANDOM_SIZE,
                };
                self.show_notice(NoticeKind::Error, err.to_string());
                return;
            }
        };
        self.random_popup = None;
        let palette = color::random_palette(size, &mut rand::rng());
        self.set_palette(palette, PaletteSource::Random);
    }

    /// Replaces the current palette; the swatch view and every action follow it.
    pub fn set_palette(&mut self, palette: Palette, source: PaletteSource) {
        info!(colors = palette.len(), source = ?source, "palette generated");
        self.palette = Some(palette);
        self.palette_source = Some(source);
        self.status = None;
        self.navigate_to(AppView::Generator);
    }

    fn copy_current(&mut self) {
        let Some(palette) = self.palette.as_ref() else {
            return;
        };
        let result = copy_palette(&mut self.clipboard, palette);
        match result {
            Ok(()) => {
                info!("palette copied to clipboard");
                self.show_notice(NoticeKind::Info, "Color palette copied to clipboard!");
            }
            Err(err) => {
                self.show_notice(NoticeKind::Error, format!("Failed to copy palette: {err}"))
            }
        }
    }

    fn save_current(&mut self) {
        let Some(palette) = self.palette.as_ref() else {
            return;
        };
        let result = self.saved.append(palette);
        match result {
            Ok(count) => {
                info!(count, "palette saved");
                if self.view == AppView::Saved {
                    self.load_saved();
                }
                self.show_notice(NoticeKind::Info, "Palette saved successfully!");
            }
            Err(err) => {
                self.show_notice(NoticeKind::Error, format!("Failed to save palette: {err}"))
            }
        }
    }

    fn share_current(&mut self) {
        let Some(palette) = self.palette.as_ref() else {
            return;
        };
        let outcome = share_palette(&mut self.share, palette, &self.share_url);
        match outcome {
            ShareOutcome::Shared => self.status = Some("Thanks for sharing!".to_string()),
            ShareOutcome::Failed(detail) => self.status = Some(format!("Error sharing: {detail}")),
            ShareOutcome::Unsupported => self.show_notice(
                NoticeKind::Error,
                "Sharing is not supported on this terminal.",
            ),
        }
    }

    fn export_current_json(&mut self) {
        let Some(palette) = self.palette.as_ref() else {
            return;
        };
        let result = export::export_json(&self.downloads, palette);
        match result {
            Ok(path) => {
                self.show_notice(NoticeKind::Info, format!("Exported {}", path.display()))
            }
            Err(err) => self.show_notice(NoticeKind::Error, err.to_string()),
        }
    }

    fn export_current_image(&mut self) {
        let Some(palette) = self.palette.as_ref() else {
            return;
        };
        if self.image_export.is_loading() {
            self.status = Some("Image export already in progress.".to_string());
            return;
        }
        self.image_export =
            ImageExport::begin(palette, Arc::clone(&self.watermark), self.watermark_timeout);
        if self.image_export.is_loading() {
            debug!("image export waiting on watermark");
            self.status = Some("Exporting image...".to_string());
        } else {
            self.finish_image_export();
        }
    }

    fn poll_image_export(&mut self) {
        if self.image_export.advance(&self.downloads) {
            self.finish_image_export();
        }
    }

    fn finish_image_export(&mut self) {
        match std::mem::take(&mut self.image_export) {
            ImageExport::Composited(path) => {
                self.status = None;
                self.show_notice(NoticeKind::Info, format!("Exported {}", path.display()));
            }
            ImageExport::Failed(failure) => {
                self.status = None;
                self.show_notice(NoticeKind::Error, failure.to_string());
            }
            other => self.image_export = other,
        }
    }

    fn load_saved(&mut self) {
        match self.saved.load() {
            Ok(palettes) => {
                self.saved_palettes = palettes;
                self.saved_error = None;
                if self.selected_saved_index >= self.saved_palettes.len() {
                    self.selected_saved_index = self.saved_palettes.len().saturating_sub(1);
                }
            }
            Err(err) => {
                warn!(error = %err, "saved palettes unreadable");
                self.saved_error = Some(format!("Failed to load saved palettes: {err}"));
            }
        }
    }

    fn move_saved_selection_up(&mut self) {
        if self.view != AppView::Saved || self.saved_palettes.is_empty() {
            return;
        }
        if self.selected_saved_index == 0 {
            self.selected_saved_index = self.saved_palettes.len() - 1;
        } else {
            self.selected_saved_index -= 1;
        }
    }

    fn move_saved_selection_down(&mut self) {
        if self.view != AppView::Saved || self.saved_palettes.is_empty() {
            return;
        }
        self.selected_saved_index = (self.selected_saved_index + 1) % self.saved_palettes.len();
    }

    fn restore_selected_saved(&mut self) {
        let index = self.selected_saved_index;
        if let Some(palette) = self.saved_palettes.get(index).cloned() {
            self.set_palette(palette, PaletteSource::Saved { index });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::thread;
    use std::time::Instant;

    use anyhow::Result;

    use super::*;
    use crate::color::named_palette;
    use crate::db::{MemoryStore, SAVED_PALETTES_KEY};
    use crate::export::png::tests::{MissingWatermark, SolidWatermark};
    use crate::export::{
        Capability, ClipboardSink, IMAGE_FILE_NAME, JSON_FILE_NAME, SharePayload, ShareTarget,
    };

    #[derive(Clone, Default)]
    struct FakeClipboard {
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardSink for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), String> {
            self.writes.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct FakeShare {
        payloads: Rc<RefCell<Vec<SharePayload>>>,
    }

    impl ShareTarget for FakeShare {
        fn share(&mut self, payload: &SharePayload) -> Result<()> {
            self.payloads.borrow_mut().push(payload.clone());
            Ok(())
        }
    }

    struct Harness {
        app: App,
        clipboard: FakeClipboard,
        share: FakeShare,
        dir: tempfile::TempDir,
    }

    fn harness_with(watermark: Arc<dyn WatermarkSource>, share_enabled: bool) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let clipboard = FakeClipboard::default();
        let share = FakeShare::default();
        let share_capability: ShareCapability = if share_enabled {
            Capability::Available(Box::new(share.clone()))
        } else {
            Capability::Unavailable("disabled".to_string())
        };
        let app = App::new(Services {
            store: Box::new(MemoryStore::new()),
            clipboard: Capability::Available(Box::new(clipboard.clone())),
            share: share_capability,
            downloads: Downloads::new(dir.path()),
            watermark,
            watermark_timeout: Duration::from_secs(5),
            share_url: "https://example.com/palettr".to_string(),
        });
        Harness {
            app,
            clipboard,
            share,
            dir,
        }
    }

    fn harness() -> Harness {
        harness_with(Arc::new(SolidWatermark), true)
    }

    fn press(app: &mut App, key: KeyCode) {
        app.update(AppEvent::KeyPress(key));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn generate_named(app: &mut App, name: &str, size: usize) {
        press(app, KeyCode::Char('n'));
        if let Some(popup) = app.name_popup.as_mut() {
            popup.name.clear();
            popup.size.clear();
        }
        type_text(app, name);
        press(app, KeyCode::Tab);
        type_text(app, &size.to_string());
        press(app, KeyCode::Enter);
    }

    fn generate_random(app: &mut App, size: &str) {
        press(app, KeyCode::Char('r'));
        type_text(app, size);
        press(app, KeyCode::Enter);
    }

    fn wait_for_image_export(app: &mut App) {
        let started = Instant::now();
        app.update(AppEvent::Tick);
        while app.image_export.is_loading() {
            assert!(started.elapsed() < Duration::from_secs(5));
            thread::sleep(Duration::from_millis(5));
            app.update(AppEvent::Tick);
        }
    }

    #[test]
    fn name_form_generates_deterministic_palette() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        assert!(h.app.name_popup.is_none());
        assert_eq!(h.app.palette, Some(named_palette("Ada", 4).unwrap()));
        assert_eq!(
            h.app.palette_source,
            Some(PaletteSource::Named {
                name: "Ada".to_string()
            })
        );
    }

    #[test]
    fn name_form_rejects_empty_name_and_zero_size() {
        let mut h = harness();
        generate_named(&mut h.app, "", 4);
        assert_eq!(h.app.notice.as_ref().unwrap().message, "Please enter a name.");
        assert!(h.app.palette.is_none());
        assert!(h.app.name_popup.is_some());

        press(&mut h.app, KeyCode::Enter);
        press(&mut h.app, KeyCode::Esc);
        generate_named(&mut h.app, "Ada", 0);
        assert_eq!(h.app.notice.as_ref().unwrap().kind, NoticeKind::Error);
        assert!(h.app.palette.is_none());
    }

    #[test]
    fn random_sizes_outside_bounds_are_rejected() {
        for size in ["3", "17"] {
            let mut h = harness();
            generate_random(&mut h.app, size);
            let notice = h.app.notice.clone().unwrap();
            assert_eq!(notice.message, "Please enter a size between 4 and 16.");
            assert!(h.app.palette.is_none());
        }
    }

    #[test]
    fn random_sizes_at_bounds_and_default() {
        let mut h = harness();
        generate_random(&mut h.app, "4");
        assert_eq!(h.app.palette.as_ref().unwrap().len(), 4);
        generate_random(&mut h.app, "16");
        assert_eq!(h.app.palette.as_ref().unwrap().len(), 16);
        generate_random(&mut h.app, "");
        assert_eq!(h.app.palette.as_ref().unwrap().len(), DEFAULT_RANDOM_SIZE);
        assert_eq!(h.app.palette_source, Some(PaletteSource::Random));
    }

    #[test]
    fn notice_blocks_input_until_dismissed() {
        let mut h = harness();
        generate_random(&mut h.app, "3");
        assert!(h.app.notice.is_some());
        press(&mut h.app, KeyCode::Char('q'));
        assert!(h.app.running);
        press(&mut h.app, KeyCode::Enter);
        assert!(h.app.notice.is_none());
    }

    #[test]
    fn actions_without_palette_do_nothing() {
        let mut h = harness();
        for key in ['c', 's', 'x', 'j', 'i'] {
            press(&mut h.app, KeyCode::Char(key));
        }
        assert!(h.app.notice.is_none());
        assert!(h.clipboard.writes.borrow().is_empty());
        assert!(h.share.payloads.borrow().is_empty());
        assert_eq!(std::fs::read_dir(h.dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn copy_reads_palette_at_invocation_time() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        generate_named(&mut h.app, "Grace", 6);
        press(&mut h.app, KeyCode::Char('c'));
        let expected = named_palette("Grace", 6).unwrap().join("\n");
        assert_eq!(h.clipboard.writes.borrow().as_slice(), [expected]);
        assert_eq!(
            h.app.notice.as_ref().unwrap().message,
            "Color palette copied to clipboard!"
        );
    }

    #[test]
    fn saves_accumulate_in_order() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('s'));
        press(&mut h.app, KeyCode::Enter);
        generate_named(&mut h.app, "Grace", 5);
        press(&mut h.app, KeyCode::Char('s'));
        assert_eq!(
            h.app.notice.as_ref().unwrap().message,
            "Palette saved successfully!"
        );
        press(&mut h.app, KeyCode::Enter);

        press(&mut h.app, KeyCode::Char('v'));
        assert_eq!(h.app.view, AppView::Saved);
        assert_eq!(
            h.app.saved_palettes,
            vec![
                named_palette("Ada", 4).unwrap(),
                named_palette("Grace", 5).unwrap()
            ]
        );
        assert!(h.app.saved.store().get(SAVED_PALETTES_KEY).unwrap().is_some());
    }

    #[test]
    fn saved_palette_can_be_restored() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('s'));
        press(&mut h.app, KeyCode::Enter);
        generate_random(&mut h.app, "8");

        press(&mut h.app, KeyCode::Char('v'));
        press(&mut h.app, KeyCode::Down);
        press(&mut h.app, KeyCode::Enter);
        assert_eq!(h.app.view, AppView::Generator);
        assert_eq!(h.app.palette, Some(named_palette("Ada", 4).unwrap()));
        assert_eq!(h.app.palette_source, Some(PaletteSource::Saved { index: 0 }));
    }

    #[test]
    fn share_sends_payload_or_reports_unsupported() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('x'));
        assert_eq!(h.app.status.as_deref(), Some("Thanks for sharing!"));
        let payloads = h.share.payloads.borrow();
        assert_eq!(payloads.len(), 1);
        assert!(payloads[0].text.ends_with(&named_palette("Ada", 4).unwrap().join(", ")));
        assert_eq!(payloads[0].url, "https://example.com/palettr");

        let mut h = harness_with(Arc::new(SolidWatermark), false);
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('x'));
        assert_eq!(
            h.app.notice.as_ref().unwrap().message,
            "Sharing is not supported on this terminal."
        );
    }

    #[test]
    fn json_export_matches_current_palette() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('j'));
        let raw = std::fs::read_to_string(h.dir.path().join(JSON_FILE_NAME)).unwrap();
        let parsed: Palette = serde_json::from_str(&raw).unwrap();
        assert_eq!(Some(parsed), h.app.palette);
    }

    #[test]
    fn image_export_writes_png_after_watermark_loads() {
        let mut h = harness();
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('i'));
        wait_for_image_export(&mut h.app);
        assert_eq!(h.app.notice.as_ref().unwrap().kind, NoticeKind::Info);
        assert!(h.dir.path().join(IMAGE_FILE_NAME).exists());
        assert!(matches!(h.app.image_export, ImageExport::Idle));
    }

    #[test]
    fn image_export_failure_notifies_and_writes_nothing() {
        let mut h = harness_with(Arc::new(MissingWatermark), true);
        generate_named(&mut h.app, "Ada", 4);
        press(&mut h.app, KeyCode::Char('i'));
        wait_for_image_export(&mut h.app);
        let notice = h.app.notice.clone().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Failed to load watermark.");
        assert!(!h.dir.path().join(IMAGE_FILE_NAME).exists());
    }

    #[test]
    fn unreadable_history_is_reported_apart_from_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryStore::new();
        store.set(SAVED_PALETTES_KEY, "not json").unwrap();
        let mut app = App::new(Services {
            store: Box::new(store),
            clipboard: Capability::Unavailable("none".to_string()),
            share: Capability::Unavailable("none".to_string()),
            downloads: Downloads::new(dir.path()),
            watermark: Arc::new(SolidWatermark),
            watermark_timeout: Duration::from_secs(5),
            share_url: String::new(),
        });
        press(&mut app, KeyCode::Char('v'));
        assert!(
            app.saved_error
                .as_deref()
                .unwrap()
                .starts_with("Failed to load saved palettes")
        );
        assert!(app.status.is_none());
    }

    #[test]
    fn help_toggles_and_back_returns() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('?'));
        assert_eq!(h.app.view, AppView::Help);
        press(&mut h.app, KeyCode::Char('?'));
        assert_eq!(h.app.view, AppView::Generator);
        press(&mut h.app, KeyCode::Char('v'));
        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.view, AppView::Generator);
        press(&mut h.app, KeyCode::Char('q'));
        assert!(!h.app.running);
    }
}
