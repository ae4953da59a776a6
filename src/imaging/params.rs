//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides sizes and offsets) and the [`backend`](super::backend)
//! (which does the pixel work). A mock backend can record them in tests.
//!
//! ## Types
//!
//! - [`Quality`]: JPEG quality (1–100, default 95). Clamped on construction.
//! - [`ResampleParams`]: resize to exact dimensions and re-encode.
//! - [`SquareParams`]: fit inside a square and pad with white.
//! - [`GridParams`]: paste tiles onto a white canvas.
//! - [`FrameParams`]: resize, then add a uniform white frame.

use super::calculations::Padding;
use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// Parameters for a plain resize to exact dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
}

/// Parameters for fitting an image into a padded square.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Dimensions of the image content inside the square.
    pub fit_width: u32,
    pub fit_height: u32,
    /// Side of the output square.
    pub size: u32,
    pub padding: Padding,
    pub quality: Quality,
}

/// One tile of a grid and its top-left offset on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    pub source: PathBuf,
    pub x: u32,
    pub y: u32,
}

/// Parameters for pasting tiles onto a blank canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    pub tiles: Vec<TilePlacement>,
    pub output: PathBuf,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub quality: Quality,
}

/// Parameters for the framed final image.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Interior dimensions, before the frame is added.
    pub width: u32,
    pub height: u32,
    /// Frame thickness on every side.
    pub border: u32,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_95() {
        assert_eq!(Quality::default().value(), 95);
    }
}
