//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take configuration, compute parameters, and call the backend.
//! Each `plan_*` function is the pure half of its operation.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{
    calculate_cell_offset, calculate_fit_dimensions, calculate_framed_dimensions,
    calculate_grid_shape, calculate_long_edge_dimensions, calculate_square_padding,
};
use super::params::{FrameParams, GridParams, Quality, ResampleParams, SquareParams, TilePlacement};
use crate::types::GridShape;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    Ok(backend.identify(path)?.into())
}

/// Configuration for long-edge resampling.
#[derive(Debug, Clone, Copy)]
pub struct ResampleConfig {
    pub long_edge: u32,
    pub quality: Quality,
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            long_edge: 4000,
            quality: Quality::default(),
        }
    }
}

/// Plan a resample without executing it.
pub fn plan_resample(
    source: &Path,
    output: &Path,
    source_dims: (u32, u32),
    config: &ResampleConfig,
) -> ResampleParams {
    let (width, height) = calculate_long_edge_dimensions(source_dims, config.long_edge);
    ResampleParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: config.quality,
    }
}

/// Resample an image so its long edge is `config.long_edge`.
pub fn resample_image(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &ResampleConfig,
) -> Result<Dimensions> {
    let dims = get_dimensions(backend, source)?;
    let params = plan_resample(source, output, dims, config);
    backend.resize(&params)?;
    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}

/// Configuration for the white square border around each image.
#[derive(Debug, Clone, Copy)]
pub struct SquareConfig {
    pub size: u32,
    pub quality: Quality,
}

impl Default for SquareConfig {
    fn default() -> Self {
        Self {
            size: 4200,
            quality: Quality::default(),
        }
    }
}

/// Plan a square border without executing it.
pub fn plan_square(
    source: &Path,
    output: &Path,
    source_dims: (u32, u32),
    config: &SquareConfig,
) -> SquareParams {
    let fit = calculate_fit_dimensions(source_dims, config.size);
    SquareParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        fit_width: fit.0,
        fit_height: fit.1,
        size: config.size,
        padding: calculate_square_padding(fit, config.size),
        quality: config.quality,
    }
}

/// Center an image on a white `size × size` square.
///
/// Larger images are shrunk to fit first; smaller ones are never enlarged.
pub fn add_square_border(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &SquareConfig,
) -> Result<Dimensions> {
    let dims = get_dimensions(backend, source)?;
    backend.square(&plan_square(source, output, dims, config))?;
    Ok(Dimensions {
        width: config.size,
        height: config.size,
    })
}

/// Configuration for the grid composite.
#[derive(Debug, Clone, Copy)]
pub struct GridConfig {
    /// Side of each square cell; matches [`SquareConfig::size`].
    pub cell_size: u32,
    pub quality: Quality,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 4200,
            quality: Quality::default(),
        }
    }
}

/// Plan a grid composite: shape, canvas size and one placement per tile.
///
/// Fails when the canvas would not fit in `u32` pixels per side.
pub fn plan_grid(
    tiles: &[PathBuf],
    output: &Path,
    config: &GridConfig,
) -> Result<(GridShape, GridParams)> {
    let shape = calculate_grid_shape(tiles.len());
    let (canvas_width, canvas_height) = shape.canvas_size(config.cell_size).ok_or_else(|| {
        BackendError::ProcessingFailed(format!(
            "Collage of {}x{} cells at {}px is too large",
            shape.columns, shape.rows, config.cell_size
        ))
    })?;

    let placements = tiles
        .iter()
        .enumerate()
        .map(|(index, source)| {
            let (x, y) = calculate_cell_offset(index, shape.columns, config.cell_size);
            TilePlacement {
                source: source.clone(),
                x,
                y,
            }
        })
        .collect();

    let params = GridParams {
        tiles: placements,
        output: output.to_path_buf(),
        canvas_width,
        canvas_height,
        quality: config.quality,
    };
    Ok((shape, params))
}

/// Tile square images into a row-major grid on a white canvas.
pub fn create_collage(
    backend: &impl ImageBackend,
    tiles: &[PathBuf],
    output: &Path,
    config: &GridConfig,
) -> Result<GridShape> {
    if tiles.is_empty() {
        return Err(BackendError::ProcessingFailed(
            "Cannot compose a collage from zero images".to_string(),
        ));
    }
    let (shape, params) = plan_grid(tiles, output, config)?;
    backend.compose(&params)?;
    Ok(shape)
}

/// Configuration for the framed final image.
#[derive(Debug, Clone, Copy)]
pub struct FrameConfig {
    /// Approximate long edge of the result, frame included.
    pub long_edge: u32,
    /// Frame thickness on every side.
    pub border: u32,
    pub quality: Quality,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            long_edge: 10000,
            border: 200,
            quality: Quality::default(),
        }
    }
}

/// Plan the final frame without executing it.
pub fn plan_frame(
    source: &Path,
    output: &Path,
    source_dims: (u32, u32),
    config: &FrameConfig,
) -> FrameParams {
    let (width, height) = calculate_framed_dimensions(source_dims, config.long_edge, config.border);
    FrameParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        border: config.border,
        quality: config.quality,
    }
}

/// Scale the composite and surround it with a white frame.
///
/// Returns the dimensions of the written file, frame included.
pub fn add_final_frame(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    config: &FrameConfig,
) -> Result<Dimensions> {
    let dims = get_dimensions(backend, source)?;
    let params = plan_frame(source, output, dims, config);
    backend.frame(&params)?;
    Ok(Dimensions {
        width: params.width + 2 * params.border,
        height: params.height + 2 * params.border,
    })
}
