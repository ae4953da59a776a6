//! Image processing on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `ImageReader::into_dimensions` |
//! | **Resample** | Lanczos3 resize → quality-95 JPEG |
//! | **Square border** | shrink-to-fit + white padding |
//! | **Grid** | paste tiles on a white canvas |
//! | **Frame** | resize + uniform white border |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    BorderScale, Padding, calculate_cell_offset, calculate_dynamic_border,
    calculate_fit_dimensions, calculate_framed_dimensions, calculate_grid_shape,
    calculate_long_edge_dimensions, calculate_square_padding,
};
pub use operations::{
    FrameConfig, GridConfig, ResampleConfig, SquareConfig, add_final_frame, add_square_border,
    create_collage, get_dimensions, resample_image,
};
pub use params::{FrameParams, GridParams, Quality, ResampleParams, SquareParams, TilePlacement};
pub use rust_backend::{RustBackend, supported_input_extensions};
