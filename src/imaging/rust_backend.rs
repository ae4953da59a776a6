//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP, GIF) | `image::ImageReader`, allocation limits off |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Pad / paste | `image::imageops::replace` onto a white `RgbImage` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder`, 8-bit RGB |
//!
//! Every decoded buffer is owned by the operation that loaded it and is
//! dropped before the operation returns, on success and on error.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{FrameParams, GridParams, ResampleParams, SquareParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{ImageError, ImageFormat, ImageReader, Rgb, RgbImage};
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Fill color for padding, frames and empty grid cells.
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
    ("bmp", ImageFormat::Bmp),
    ("gif", ImageFormat::Gif),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Any failure while reading a source, whether from the file system or the
/// decoder, is reported against that source path.
fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    let mut reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_error(path, e))?;
    // Very large scans and composites must decode; the default limits cap
    // allocations at 512 MiB.
    reader.no_limits();
    Ok(reader)
}

/// Load an image from disk as opaque 8-bit RGB.
fn load_rgb(path: &Path) -> Result<RgbImage, BackendError> {
    let img = open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))?;
    Ok(img.into_rgb8())
}

/// Encode as baseline 8-bit JPEG.
fn save_jpeg(img: &RgbImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100) as u8)
        .encode_image(img)
        .map_err(|e| match e {
            ImageError::IoError(io) => BackendError::Io(io),
            other => BackendError::Encode {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        })?;
    writer.flush()?;
    Ok(())
}

/// Resize only when the size actually changes.
fn resize_to(img: RgbImage, width: u32, height: u32) -> RgbImage {
    if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, FilterType::Lanczos3)
    }
}

/// Paste `inner` onto a new white canvas at `(x, y)`.
fn paste_on_white(inner: &RgbImage, width: u32, height: u32, x: u32, y: u32) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(width, height, WHITE);
    imageops::replace(&mut canvas, inner, x as i64, y as i64);
    canvas
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResampleParams) -> Result<(), BackendError> {
        let img = load_rgb(&params.source)?;
        debug!(
            source = %params.source.display(),
            from = ?img.dimensions(),
            to = ?(params.width, params.height),
            "resample"
        );
        let resized = resize_to(img, params.width, params.height);
        save_jpeg(&resized, &params.output, params.quality.value())
    }

    fn square(&self, params: &SquareParams) -> Result<(), BackendError> {
        let img = load_rgb(&params.source)?;
        let fitted = resize_to(img, params.fit_width, params.fit_height);
        debug!(
            source = %params.source.display(),
            fit = ?fitted.dimensions(),
            size = params.size,
            "square border"
        );
        let squared = paste_on_white(
            &fitted,
            params.size,
            params.size,
            params.padding.left,
            params.padding.top,
        );
        save_jpeg(&squared, &params.output, params.quality.value())
    }

    fn compose(&self, params: &GridParams) -> Result<(), BackendError> {
        let mut canvas = RgbImage::from_pixel(params.canvas_width, params.canvas_height, WHITE);
        for tile in &params.tiles {
            let img = load_rgb(&tile.source)?;
            debug!(source = %tile.source.display(), x = tile.x, y = tile.y, "paste tile");
            imageops::replace(&mut canvas, &img, tile.x as i64, tile.y as i64);
        }
        save_jpeg(&canvas, &params.output, params.quality.value())
    }

    fn frame(&self, params: &FrameParams) -> Result<(), BackendError> {
        let img = load_rgb(&params.source)?;
        let interior = resize_to(img, params.width, params.height);
        let b = params.border;
        debug!(
            source = %params.source.display(),
            interior = ?interior.dimensions(),
            border = b,
            "final frame"
        );
        let framed = paste_on_white(
            &interior,
            params.width + 2 * b,
            params.height + 2 * b,
            b,
            b,
        );
        save_jpeg(&framed, &params.output, params.quality.value())
    }
}
