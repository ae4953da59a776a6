//! The collage pipeline.
//!
//! ```text
//! for each image, in order:
//!     source ──resample──▶ {prefix}_resampled_{name}
//!            ──square────▶ {prefix}_bordered_{name}
//! all bordered ──grid────▶ {prefix}_collage.jpg
//! collage ──frame────────▶ {prefix}_collage_resampled_with_border.jpg
//! ```
//!
//! A run is all-or-nothing per invocation: the selection is validated before
//! anything is written, and the first decode or write failure aborts the rest.
//! Files written before a failure stay on disk.
//!
//! Work is strictly sequential. Progress is reported through an optional
//! [`mpsc::Sender`]; the pipeline never blocks on the receiver.

use crate::config::LayoutConfig;
use crate::imaging::{
    BackendError, ImageBackend, RustBackend, add_final_frame, add_square_border,
    calculate_dynamic_border, calculate_grid_shape, create_collage, resample_image,
};
use crate::naming;
use crate::select::{SelectionError, validate_export_dir, validate_selection};
use crate::types::{GridShape, ImageSet};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("A {columns}x{rows} grid of {cell_size}px cells is too large for one image")]
    CanvasTooLarge {
        columns: usize,
        rows: usize,
        cell_size: u32,
    },
}

/// Everything one run needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub images: ImageSet,
    pub export_dir: PathBuf,
    /// Raw prefix as typed; trimmed and defaulted during planning.
    pub prefix: String,
}

/// Output paths for one source image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePlan {
    pub source: PathBuf,
    pub resampled: PathBuf,
    pub bordered: PathBuf,
}

/// Every path and derived size of a run, computed without touching disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelinePlan {
    pub prefix: String,
    pub export_dir: PathBuf,
    pub images: Vec<ImagePlan>,
    pub grid: GridShape,
    pub border: u32,
    /// Collage canvas size before framing.
    pub collage_size: (u32, u32),
    pub collage: PathBuf,
    pub final_output: PathBuf,
}

/// Progress events, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    ImageStarted {
        index: usize,
        total: usize,
        source: PathBuf,
    },
    ImageResampled {
        index: usize,
        output: PathBuf,
        width: u32,
        height: u32,
    },
    ImageBordered {
        index: usize,
        output: PathBuf,
        size: u32,
    },
    CollageComposed {
        output: PathBuf,
        grid: GridShape,
    },
    Finished {
        output: PathBuf,
        width: u32,
        height: u32,
        border: u32,
    },
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub images: Vec<ImagePlan>,
    pub grid: GridShape,
    pub border: u32,
    pub collage: PathBuf,
    pub final_output: PathBuf,
    pub final_width: u32,
    pub final_height: u32,
}

/// Plan a run: validate the selection size and compute every output path.
///
/// Does not check the export directory, so a plan can be printed for a
/// directory that does not exist yet.
pub fn plan_pipeline(
    request: &PipelineRequest,
    config: &LayoutConfig,
) -> Result<PipelinePlan, PipelineError> {
    let images = validate_selection(
        request.images.paths().to_vec(),
        config.selection.max_images,
    )?;
    let prefix = naming::normalize_prefix(&request.prefix, &config.output.default_prefix);
    let dir = request.export_dir.as_path();

    let image_plans = images
        .iter()
        .map(|source| ImagePlan {
            source: source.to_path_buf(),
            resampled: naming::resampled_path(dir, &prefix, source),
            bordered: naming::bordered_path(dir, &prefix, source),
        })
        .collect();

    let grid = calculate_grid_shape(images.len());
    let border = calculate_dynamic_border(grid.columns as u32, &config.border_scale());
    let cell_size = config.border.cell_size;
    let collage_size = grid
        .canvas_size(cell_size)
        .ok_or(PipelineError::CanvasTooLarge {
            columns: grid.columns,
            rows: grid.rows,
            cell_size,
        })?;

    Ok(PipelinePlan {
        collage: naming::collage_path(dir, &prefix),
        final_output: naming::final_path(dir, &prefix),
        collage_size,
        prefix,
        export_dir: request.export_dir.clone(),
        images: image_plans,
        grid,
        border,
    })
}

fn emit(events: &Option<mpsc::Sender<PipelineEvent>>, event: PipelineEvent) {
    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening
        let _ = tx.send(event);
    }
}

/// Run the pipeline with the `image`-crate backend.
pub fn run(
    request: &PipelineRequest,
    config: &LayoutConfig,
    events: Option<mpsc::Sender<PipelineEvent>>,
) -> Result<RunReport, PipelineError> {
    run_with_backend(&RustBackend::new(), request, config, events)
}

/// Run the pipeline using a specific backend (allows testing with mock).
pub fn run_with_backend(
    backend: &impl ImageBackend,
    request: &PipelineRequest,
    config: &LayoutConfig,
    events: Option<mpsc::Sender<PipelineEvent>>,
) -> Result<RunReport, PipelineError> {
    let plan = plan_pipeline(request, config)?;
    validate_export_dir(&plan.export_dir)?;
    execute_plan(backend, &plan, config, &events)
}

fn execute_plan(
    backend: &impl ImageBackend,
    plan: &PipelinePlan,
    config: &LayoutConfig,
    events: &Option<mpsc::Sender<PipelineEvent>>,
) -> Result<RunReport, PipelineError> {
    let total = plan.images.len();
    let resample = config.resample_config();
    let square = config.square_config();

    let mut bordered = Vec::with_capacity(total);
    for (index, image) in plan.images.iter().enumerate() {
        emit(
            events,
            PipelineEvent::ImageStarted {
                index: index + 1,
                total,
                source: image.source.clone(),
            },
        );

        let dims = resample_image(backend, &image.source, &image.resampled, &resample)?;
        emit(
            events,
            PipelineEvent::ImageResampled {
                index: index + 1,
                output: image.resampled.clone(),
                width: dims.width,
                height: dims.height,
            },
        );

        add_square_border(backend, &image.resampled, &image.bordered, &square)?;
        emit(
            events,
            PipelineEvent::ImageBordered {
                index: index + 1,
                output: image.bordered.clone(),
                size: square.size,
            },
        );
        bordered.push(image.bordered.clone());
    }

    let grid = create_collage(backend, &bordered, &plan.collage, &config.grid_config())?;
    debug!(columns = grid.columns, rows = grid.rows, "collage composed");
    emit(
        events,
        PipelineEvent::CollageComposed {
            output: plan.collage.clone(),
            grid,
        },
    );

    let border = calculate_dynamic_border(grid.columns as u32, &config.border_scale());
    let framed = add_final_frame(
        backend,
        &plan.collage,
        &plan.final_output,
        &config.frame_config(border),
    )?;
    emit(
        events,
        PipelineEvent::Finished {
            output: plan.final_output.clone(),
            width: framed.width,
            height: framed.height,
            border,
        },
    );
    info!(
        output = %plan.final_output.display(),
        width = framed.width,
        height = framed.height,
        border,
        "collage finished"
    );

    Ok(RunReport {
        images: plan.images.clone(),
        grid,
        border,
        collage: plan.collage.clone(),
        final_output: plan.final_output.clone(),
        final_width: framed.width,
        final_height: framed.height,
    })
}

/// Basename of a path for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
