//! Watermarked PNG export.
//!
//! The palette is drawn synchronously onto a 300x90 canvas, then the watermark
//! is loaded on a worker thread. The controller polls the pending export on
//! each tick until the load resolves, fails or runs past its deadline.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{ExportError, WatermarkError};
use crate::types::Palette;

use super::{Downloads, IMAGE_FILE_NAME};

pub const CANVAS_WIDTH: u32 = 300;
pub const SWATCH_HEIGHT: u32 = 50;
pub const WATERMARK_BAND: u32 = 40;
pub const CANVAS_HEIGHT: u32 = SWATCH_HEIGHT + WATERMARK_BAND;
pub const WATERMARK_WIDTH: u32 = 270;
pub const WATERMARK_HEIGHT: u32 = 35;
pub const WATERMARK_MARGIN_RIGHT: u32 = 10;
pub const WATERMARK_MARGIN_BOTTOM: u32 = 5;
pub const WATERMARK_OPACITY: f32 = 0.5;

/// Where the watermark comes from.
pub trait WatermarkSource: Send + Sync {
    fn load(&self) -> Result<RgbaImage, WatermarkError>;
}

/// A watermark image on disk, any format the `image` crate decodes.
pub struct FileWatermark {
    path: PathBuf,
}

impl FileWatermark {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WatermarkSource for FileWatermark {
    fn load(&self) -> Result<RgbaImage, WatermarkError> {
        image::open(&self.path)
            .map(|image| image.to_rgba8())
            .map_err(|source| WatermarkError::Decode {
                path: self.path.clone(),
                source,
            })
    }
}

#[derive(Debug, Error)]
pub enum ExportFailure {
    #[error("Failed to load watermark.")]
    Watermark(#[source] WatermarkError),
    #[error("Timed out loading watermark.")]
    TimedOut,
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Draws each color as an equal-width vertical band across the swatch rows.
pub fn draw_palette(palette: &Palette) -> Result<RgbaImage, ExportError> {
    if palette.is_empty() {
        return Err(ExportError::EmptyPalette);
    }
    let count = palette.len() as u64;
    let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    for x in 0..CANVAS_WIDTH {
        let index = (u64::from(x) * count / u64::from(CANVAS_WIDTH)) as usize;
        let color = palette.colors[index];
        let pixel = Rgba([color.r, color.g, color.b, 255]);
        for y in 0..SWATCH_HEIGHT {
            canvas.put_pixel(x, y, pixel);
        }
    }
    Ok(canvas)
}

/// Scales the watermark and blends it into the bottom-right corner at half opacity.
pub fn composite_watermark(canvas: &mut RgbaImage, watermark: &RgbaImage) {
    let scaled = if watermark.dimensions() == (WATERMARK_WIDTH, WATERMARK_HEIGHT) {
        watermark.clone()
    } else {
        imageops::resize(
            watermark,
            WATERMARK_WIDTH,
            WATERMARK_HEIGHT,
            FilterType::Triangle,
        )
    };
    let origin_x = canvas
        .width()
        .saturating_sub(WATERMARK_WIDTH + WATERMARK_MARGIN_RIGHT);
    let origin_y = canvas
        .height()
        .saturating_sub(WATERMARK_HEIGHT + WATERMARK_MARGIN_BOTTOM);

    for (x, y, src) in scaled.enumerate_pixels() {
        let (cx, cy) = (origin_x + x, origin_y + y);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        *dst = blend_over(*src, *dst, WATERMARK_OPACITY);
    }
}

fn blend_over(src: Rgba<u8>, dst: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let src_alpha = f32::from(src[3]) / 255.0 * opacity;
    let dst_alpha = f32::from(dst[3]) / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let mix = |s: u8, d: u8| {
        let value =
            (f32::from(s) * src_alpha + f32::from(d) * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Cursor::new(Vec::new());
    canvas.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(RgbaImage),
    Failed(WatermarkError),
    TimedOut,
}

/// A drawn canvas waiting on its watermark.
pub struct PendingImage {
    canvas: RgbaImage,
    receiver: Receiver<Result<RgbaImage, WatermarkError>>,
    deadline: Instant,
}

impl PendingImage {
    pub fn start(
        palette: &Palette,
        source: Arc<dyn WatermarkSource>,
        timeout: Duration,
    ) -> Result<Self, ExportError> {
        let canvas = draw_palette(palette)?;
        debug!(colors = palette.len(), "palette drawn, loading watermark");
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone when the export was cancelled or timed out.
            let _ = sender.send(source.load());
        });
        Ok(Self {
            canvas,
            receiver,
            deadline: Instant::now() + timeout,
        })
    }

    /// Non-blocking check; `None` while the load is still running.
    pub fn poll(&self) -> Option<LoadOutcome> {
        match self.receiver.try_recv() {
            Ok(result) => Some(Self::outcome(result)),
            Err(TryRecvError::Disconnected) => {
                Some(LoadOutcome::Failed(WatermarkError::Disconnected))
            }
            Err(TryRecvError::Empty) if Instant::now() >= self.deadline => {
                Some(LoadOutcome::TimedOut)
            }
            Err(TryRecvError::Empty) => None,
        }
    }

    /// Blocks until the load resolves or the deadline passes.
    pub fn wait(&self) -> LoadOutcome {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        match self.receiver.recv_timeout(remaining) {
            Ok(result) => Self::outcome(result),
            Err(RecvTimeoutError::Timeout) => LoadOutcome::TimedOut,
            Err(RecvTimeoutError::Disconnected) => {
                LoadOutcome::Failed(WatermarkError::Disconnected)
            }
        }
    }

    fn outcome(result: Result<RgbaImage, WatermarkError>) -> LoadOutcome {
        match result {
            Ok(watermark) => LoadOutcome::Loaded(watermark),
            Err(err) => LoadOutcome::Failed(err),
        }
    }

    /// Composites, encodes and writes the download. Nothing is written on failure.
    pub fn resolve(
        self,
        outcome: LoadOutcome,
        downloads: &Downloads,
    ) -> Result<PathBuf, ExportFailure> {
        let mut canvas = self.canvas;
        match outcome {
            LoadOutcome::Loaded(watermark) => {
                composite_watermark(&mut canvas, &watermark);
                let bytes = encode_png(&canvas)?;
                Ok(downloads.write(IMAGE_FILE_NAME, &bytes)?)
            }
            LoadOutcome::Failed(err) => {
                warn!(error = %err, "watermark failed to load");
                Err(ExportFailure::Watermark(err))
            }
            LoadOutcome::TimedOut => {
                warn!("watermark load timed out");
                Err(ExportFailure::TimedOut)
            }
        }
    }
}

/// Image export progress as seen by the controller.
#[derive(Default)]
pub enum ImageExport {
    #[default]
    Idle,
    WatermarkLoading(PendingImage),
    Composited(PathBuf),
    Failed(ExportFailure),
}

impl ImageExport {
    /// Draws the palette and kicks off the watermark load.
    pub fn begin(palette: &Palette, source: Arc<dyn WatermarkSource>, timeout: Duration) -> Self {
        match PendingImage::start(palette, source, timeout) {
            Ok(pending) => ImageExport::WatermarkLoading(pending),
            Err(err) => ImageExport::Failed(ExportFailure::Export(err)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ImageExport::WatermarkLoading(_))
    }

    /// Moves a pending export forward. Returns `true` when it reached a final state.
    pub fn advance(&mut self, downloads: &Downloads) -> bool {
        let outcome = match self {
            ImageExport::WatermarkLoading(pending) => match pending.poll() {
                Some(outcome) => outcome,
                None => return false,
            },
            _ => return false,
        };
        let ImageExport::WatermarkLoading(pending) = std::mem::take(self) else {
            return false;
        };
        *self = match pending.resolve(outcome, downloads) {
            Ok(path) => {
                info!(path = %path.display(), "image exported");
                ImageExport::Composited(path)
            }
            Err(failure) => ImageExport::Failed(failure),
        };
        true
    }

    /// Drops a pending load; the worker's late result is discarded.
    pub fn cancel(&mut self) -> bool {
        if self.is_loading() {
            debug!("image export cancelled");
            *self = ImageExport::Idle;
            true
        } else {
            false
        }
    }
}

/// Runs the whole export on the calling thread, for the command line.
pub fn export_image_blocking(
    palette: &Palette,
    source: Arc<dyn WatermarkSource>,
    timeout: Duration,
    downloads: &Downloads,
) -> Result<PathBuf, ExportFailure> {
    let pending = PendingImage::start(palette, source, timeout)?;
    let outcome = pending.wait();
    pending.resolve(outcome, downloads)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::path::Path;

    use super::*;
    use crate::types::Color;

    pub(crate) struct SolidWatermark;

    impl WatermarkSource for SolidWatermark {
        fn load(&self) -> Result<RgbaImage, WatermarkError> {
            Ok(RgbaImage::from_pixel(
                WATERMARK_WIDTH,
                WATERMARK_HEIGHT,
                Rgba([255, 255, 255, 255]),
            ))
        }
    }

    pub(crate) struct MissingWatermark;

    impl WatermarkSource for MissingWatermark {
        fn load(&self) -> Result<RgbaImage, WatermarkError> {
            Err(WatermarkError::Disconnected)
        }
    }

    struct SlowWatermark;

    impl WatermarkSource for SlowWatermark {
        fn load(&self) -> Result<RgbaImage, WatermarkError> {
            thread::sleep(Duration::from_millis(500));
            SolidWatermark.load()
        }
    }

    fn two_colors() -> Palette {
        Palette::new(vec![Color::new(255, 0, 0), Color::new(0, 0, 255)])
    }

    fn files_in(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn draws_equal_width_bands() {
        let canvas = draw_palette(&two_colors()).unwrap();
        assert_eq!(canvas.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(canvas.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(149, 49), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(150, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(299, 49), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(0, SWATCH_HEIGHT), &Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn uneven_band_count_covers_every_column() {
        let palette: Palette = (0..7).map(|i| Color::new(i * 30, 0, 0)).collect();
        let canvas = draw_palette(&palette).unwrap();
        assert_eq!(canvas.get_pixel(0, 10)[0], 0);
        assert_eq!(canvas.get_pixel(299, 10)[0], 180);
        assert!((0..CANVAS_WIDTH).all(|x| canvas.get_pixel(x, 0)[3] == 255));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(
            draw_palette(&Palette::default()),
            Err(ExportError::EmptyPalette)
        ));
    }

    #[test]
    fn watermark_lands_bottom_right_at_half_opacity() {
        let mut canvas = draw_palette(&two_colors()).unwrap();
        let watermark = SolidWatermark.load().unwrap();
        composite_watermark(&mut canvas, &watermark);

        let left = CANVAS_WIDTH - WATERMARK_WIDTH - WATERMARK_MARGIN_RIGHT;
        let top = CANVAS_HEIGHT - WATERMARK_HEIGHT - WATERMARK_MARGIN_BOTTOM;
        assert_eq!(canvas.get_pixel(left, top), &Rgba([255, 255, 255, 128]));
        assert_eq!(
            canvas.get_pixel(left + WATERMARK_WIDTH - 1, top + WATERMARK_HEIGHT - 1),
            &Rgba([255, 255, 255, 128])
        );
        assert_eq!(canvas.get_pixel(left - 1, top), &Rgba([0, 0, 0, 0]));
        assert_eq!(canvas.get_pixel(CANVAS_WIDTH - 1, top), &Rgba([0, 0, 0, 0]));
        assert_eq!(
            canvas.get_pixel(left, top + WATERMARK_HEIGHT),
            &Rgba([0, 0, 0, 0])
        );
    }

    #[test]
    fn oversized_watermark_is_scaled_into_its_box() {
        let mut canvas = RgbaImage::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        let watermark = RgbaImage::from_pixel(540, 70, Rgba([0, 0, 0, 255]));
        composite_watermark(&mut canvas, &watermark);
        let left = CANVAS_WIDTH - WATERMARK_WIDTH - WATERMARK_MARGIN_RIGHT;
        let top = CANVAS_HEIGHT - WATERMARK_HEIGHT - WATERMARK_MARGIN_BOTTOM;
        assert!(canvas.get_pixel(left + 100, top + 10)[3] > 0);
        assert_eq!(canvas.get_pixel(left - 1, top + 10)[3], 0);
        assert_eq!(canvas.get_pixel(left + 100, top - 1)[3], 0);
    }

    #[test]
    fn half_opacity_over_opaque_pixel_mixes_colors() {
        let out = blend_over(Rgba([255, 255, 255, 255]), Rgba([0, 0, 0, 255]), 0.5);
        assert_eq!(out, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn successful_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let path = export_image_blocking(
            &two_colors(),
            Arc::new(SolidWatermark),
            Duration::from_secs(5),
            &downloads,
        )
        .unwrap();
        assert_eq!(path, dir.path().join(IMAGE_FILE_NAME));
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn failed_watermark_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let err = export_image_blocking(
            &two_colors(),
            Arc::new(MissingWatermark),
            Duration::from_secs(5),
            &downloads,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Failed to load watermark.");
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn missing_file_watermark_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileWatermark::new(dir.path().join("nope.gif"));
        assert!(matches!(
            source.load(),
            Err(WatermarkError::Decode { .. })
        ));
    }

    #[test]
    fn slow_watermark_times_out_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let err = export_image_blocking(
            &two_colors(),
            Arc::new(SlowWatermark),
            Duration::from_millis(20),
            &downloads,
        )
        .unwrap_err();
        assert!(matches!(err, ExportFailure::TimedOut));
        assert_eq!(files_in(dir.path()), 0);
    }

    #[test]
    fn state_machine_advances_to_composited() {
        let dir = tempfile::tempdir().unwrap();
        let downloads = Downloads::new(dir.path());
        let mut export = ImageExport::begin(
            &two_colors(),
            Arc::new(SolidWatermark),
            Duration::from_secs(5),
        );
        assert!(export.is_loading());

        let started = Instant::now();
        while !export.advance(&downloads) {
            assert!(started.elapsed() < Duration::from_secs(5));
            thread::sleep(Duration::from_millis(5));
        }
        assert!(matches!(export, ImageExport::Composited(ref path) if path.exists()));
    }

    #[test]
    fn state_machine_fails_on_empty_palette_and_cancels() {
        let export = ImageExport::begin(
            &Palette::default(),
            Arc::new(SolidWatermark),
            Duration::from_secs(5),
        );
        assert!(matches!(
            export,
            ImageExport::Failed(ExportFailure::Export(ExportError::EmptyPalette))
        ));

        let mut export =
            ImageExport::begin(&two_colors(), Arc::new(SlowWatermark), Duration::from_secs(5));
        assert!(export.cancel());
        assert!(matches!(export, ImageExport::Idle));
        assert!(!export.cancel());
    }
}
