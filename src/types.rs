//! Shared types used across the pipeline stages.
//!
//! These are serialized in the `--json` reports, so field names are part of
//! the command-line contract.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Columns × rows of the collage grid.
///
/// Built by [`calculate_grid_shape`](crate::imaging::calculate_grid_shape):
/// `columns = ceil(sqrt(count))`, `rows = ceil(count / columns)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

impl GridShape {
    /// Number of cells in the grid. Always at least the image count.
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }

    /// Canvas size in pixels for square cells of `cell_size`, or `None` when
    /// a side does not fit in `u32`.
    pub fn canvas_size(&self, cell_size: u32) -> Option<(u32, u32)> {
        let side = |cells: usize| u32::try_from(cells).ok()?.checked_mul(cell_size);
        Some((side(self.columns)?, side(self.rows)?))
    }
}

/// Ordered list of source images.
///
/// Order is selection order and decides where each image lands in the grid.
/// The cap on the number of entries is enforced by
/// [`validate_selection`](crate::select::validate_selection), not here, so a
/// too-large selection can still be reported accurately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImageSet {
    paths: Vec<PathBuf>,
}

impl ImageSet {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl From<Vec<PathBuf>> for ImageSet {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self::new(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_canvas_size() {
        let shape = GridShape {
            columns: 3,
            rows: 2,
        };
        assert_eq!(shape.capacity(), 6);
        assert_eq!(shape.canvas_size(4200), Some((12600, 8400)));
        assert_eq!(shape.canvas_size(2_000_000_000), None);
    }

    #[test]
    fn image_set_preserves_order() {
        let set = ImageSet::from(vec![PathBuf::from("b.jpg"), PathBuf::from("a.jpg")]);
        let names: Vec<_> = set.iter().map(|p| p.to_string_lossy().into_owned()).collect();
        assert_eq!(names, vec!["b.jpg", "a.jpg"]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
