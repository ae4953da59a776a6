//! # Pics Layout
//!
//! Batches a set of photos into one square-celled grid collage with a white
//! frame around it.
//!
//! # Pipeline
//!
//! ```text
//! 1. Resample   each image  →  long edge 4000px            (JPEG q95)
//! 2. Border     each image  →  centered on a white 4200² square
//! 3. Grid       all squares →  ceil(√n) columns, row-major, no gaps
//! 4. Frame      the grid    →  ≈10000px long edge incl. a white frame
//!                              200–1000px thick, thinner for wider grids
//! ```
//!
//! Every stage reads a file and writes a file into the export directory, so
//! intermediate results stay on disk for inspection. See [`naming`] for the
//! file names.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Plans and runs a collage, reports progress events |
//! | [`imaging`] | Size calculations, operation planning, `image`-crate backend |
//! | [`select`] | `Selector` trait, selection limits, directory expansion, native dialogs |
//! | [`config`] | Optional `pics-layout.toml` loading and validation |
//! | [`naming`] | Output file names and prefix handling |
//! | [`types`] | `GridShape`, `ImageSet` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Files Between Stages
//!
//! Each stage decodes its input from disk and drops the decoded buffer before
//! returning. Peak memory is one source image plus one output canvas, which
//! matters when the composite of a 10×10 grid is 42000px on a side.
//!
//! ## Approximate Final Size
//!
//! The framed result aims for a 10000px long edge, but the interior is
//! scaled with truncating arithmetic and may land a pixel or two short.
//! Collages keep the same pixel sizes from run to run; exactness is not the
//! goal.
//!
//! ## No UI Dependency
//!
//! The pipeline takes an explicit [`pipeline::PipelineRequest`]. Where the
//! files come from is the business of a [`select::Selector`]: command-line
//! arguments by default, native dialogs with the `dialogs` feature.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod select;
pub mod types;
