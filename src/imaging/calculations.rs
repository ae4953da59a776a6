//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use crate::types::GridShape;

/// Calculate dimensions that put `long_edge` on the longer side.
///
/// The shorter side is scaled proportionally and rounded to the nearest pixel
/// (never below 1). Upscaling is allowed: the long edge always ends up at
/// exactly `long_edge`.
///
/// # Examples
/// ```
/// # use pics_layout::imaging::calculate_long_edge_dimensions;
/// assert_eq!(calculate_long_edge_dimensions((6000, 3000), 4000), (4000, 2000));
/// assert_eq!(calculate_long_edge_dimensions((300, 900), 4000), (1333, 4000));
/// ```
pub fn calculate_long_edge_dimensions(source: (u32, u32), long_edge: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w > src_h {
        let h = (long_edge as f64 * src_h as f64 / src_w as f64).round() as u32;
        (long_edge, h.max(1))
    } else {
        // Portrait or square: height is the long edge
        let w = (long_edge as f64 * src_w as f64 / src_h as f64).round() as u32;
        (w.max(1), long_edge)
    }
}

/// Calculate dimensions that fit inside a `bound × bound` square.
///
/// Only shrinks: an image already inside the square keeps its size.
pub fn calculate_fit_dimensions(source: (u32, u32), bound: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    if src_w <= bound && src_h <= bound {
        return source;
    }

    let scale = (bound as f64 / src_w as f64).min(bound as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, bound);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, bound);
    (w, h)
}

/// Padding around an image centered on a larger canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Calculate the padding that centers `inner` on a `canvas × canvas` square.
///
/// Leading edges get the floor of half the slack; the odd pixel, if any, goes
/// to the trailing edge.
pub fn calculate_square_padding(inner: (u32, u32), canvas: u32) -> Padding {
    let slack_w = canvas.saturating_sub(inner.0);
    let slack_h = canvas.saturating_sub(inner.1);
    Padding {
        left: slack_w / 2,
        top: slack_h / 2,
        right: slack_w - slack_w / 2,
        bottom: slack_h - slack_h / 2,
    }
}

/// Calculate the grid for `count` images.
///
/// Columns come from the ceiling square root, rows from the remaining count.
/// `count == 0` yields an empty 0×0 grid.
pub fn calculate_grid_shape(count: usize) -> GridShape {
    if count == 0 {
        return GridShape {
            columns: 0,
            rows: 0,
        };
    }

    // Integer ceiling square root; avoids float drift on perfect squares
    let mut columns = (count as f64).sqrt() as usize;
    while columns.saturating_mul(columns) < count {
        columns += 1;
    }
    while columns > 1 && (columns - 1).saturating_mul(columns - 1) >= count {
        columns -= 1;
    }
    let rows = count.div_ceil(columns);

    GridShape { columns, rows }
}

/// Top-left pixel offset of cell `index` in a row-major grid.
pub fn calculate_cell_offset(index: usize, columns: usize, cell_size: u32) -> (u32, u32) {
    let row = index / columns;
    let col = index % columns;
    (col as u32 * cell_size, row as u32 * cell_size)
}

/// Thresholds for the dynamic frame thickness.
///
/// At or below `min_columns` the frame is `max_border`; at or above
/// `max_columns` it is `min_border`; in between it falls linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderScale {
    pub min_border: u32,
    pub max_border: u32,
    pub min_columns: u32,
    pub max_columns: u32,
}

impl Default for BorderScale {
    fn default() -> Self {
        Self {
            min_border: 200,
            max_border: 1000,
            min_columns: 2,
            max_columns: 10,
        }
    }
}

/// Calculate the frame thickness for a grid with `columns` columns.
///
/// The interpolated value is truncated toward zero.
pub fn calculate_dynamic_border(columns: u32, scale: &BorderScale) -> u32 {
    if columns >= scale.max_columns {
        return scale.min_border;
    }
    if columns <= scale.min_columns {
        return scale.max_border;
    }

    let range = scale.max_border.saturating_sub(scale.min_border) as f64;
    let span = (scale.max_columns - scale.min_columns) as f64;
    let steps = (scale.max_columns - columns) as f64;
    (scale.min_border as f64 + range * steps / span) as u32
}

/// Calculate the interior dimensions of the framed final image.
///
/// The composite is scaled so its long edge is `long_edge - 2 * border`.
/// Both sides are truncated, so the framed result may fall a pixel or two
/// short of `long_edge`.
pub fn calculate_framed_dimensions(source: (u32, u32), long_edge: u32, border: u32) -> (u32, u32) {
    let (src_w, src_h) = source;
    let interior = long_edge.saturating_sub(border.saturating_mul(2)) as f64;
    let scale = interior / src_w.max(src_h) as f64;
    let w = (src_w as f64 * scale) as u32;
    let h = (src_h as f64 * scale) as u32;
    (w.max(1), h.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_long_edge_dimensions tests
    // =========================================================================

    #[test]
    fn long_edge_landscape_downscale() {
        assert_eq!(
            calculate_long_edge_dimensions((6000, 3000), 4000),
            (4000, 2000)
        );
    }

    #[test]
    fn long_edge_portrait_upscale() {
        // 300 * 4000 / 900 = 1333.33 → 1333
        assert_eq!(
            calculate_long_edge_dimensions((300, 900), 4000),
            (1333, 4000)
        );
    }

    #[test]
    fn long_edge_square() {
        assert_eq!(
            calculate_long_edge_dimensions((1234, 1234), 4000),
            (4000, 4000)
        );
    }

    #[test]
    fn long_edge_rounds_short_side() {
        // 4000 * 2 / 3 = 2666.67 → 2667
        assert_eq!(
            calculate_long_edge_dimensions((3000, 2000), 4000),
            (4000, 2667)
        );
    }

    #[test]
    fn long_edge_extreme_panorama_keeps_one_pixel() {
        assert_eq!(calculate_long_edge_dimensions((100_000, 1), 4000), (4000, 1));
    }

    // =========================================================================
    // calculate_fit_dimensions tests
    // =========================================================================

    #[test]
    fn fit_never_enlarges() {
        assert_eq!(calculate_fit_dimensions((1000, 2000), 4200), (1000, 2000));
        assert_eq!(calculate_fit_dimensions((4000, 2667), 4200), (4000, 2667));
    }

    #[test]
    fn fit_shrinks_landscape() {
        assert_eq!(calculate_fit_dimensions((8400, 4200), 4200), (4200, 2100));
    }

    #[test]
    fn fit_shrinks_portrait() {
        assert_eq!(calculate_fit_dimensions((3000, 6000), 4200), (2100, 4200));
    }

    #[test]
    fn fit_exact_bound_is_unchanged() {
        assert_eq!(calculate_fit_dimensions((4200, 4200), 4200), (4200, 4200));
    }

    // =========================================================================
    // calculate_square_padding tests
    // =========================================================================

    #[test]
    fn padding_even_slack_is_symmetric() {
        let p = calculate_square_padding((4000, 2000), 4200);
        assert_eq!(
            p,
            Padding {
                left: 100,
                top: 1100,
                right: 100,
                bottom: 1100
            }
        );
    }

    #[test]
    fn padding_odd_slack_goes_to_trailing_edge() {
        let p = calculate_square_padding((4000, 2667), 4200);
        assert_eq!(p.top, 766);
        assert_eq!(p.bottom, 767);
        assert_eq!(p.top + 2667 + p.bottom, 4200);
    }

    #[test]
    fn padding_full_square_is_zero() {
        let p = calculate_square_padding((4200, 4200), 4200);
        assert_eq!(p.left + p.right + p.top + p.bottom, 0);
    }

    // =========================================================================
    // calculate_grid_shape tests
    // =========================================================================

    #[test]
    fn grid_shape_holds_for_all_counts_up_to_100() {
        for n in 1..=100usize {
            let shape = calculate_grid_shape(n);
            let expected_cols = (n as f64).sqrt().ceil() as usize;
            assert_eq!(shape.columns, expected_cols, "columns for {n}");
            assert_eq!(shape.rows, n.div_ceil(expected_cols), "rows for {n}");
            assert!(shape.capacity() >= n, "capacity for {n}");
            assert!(shape.columns >= shape.rows, "columns >= rows for {n}");
        }
    }

    #[test]
    fn grid_shape_examples() {
        assert_eq!(calculate_grid_shape(1), GridShape { columns: 1, rows: 1 });
        assert_eq!(calculate_grid_shape(4), GridShape { columns: 2, rows: 2 });
        assert_eq!(calculate_grid_shape(5), GridShape { columns: 3, rows: 2 });
        assert_eq!(calculate_grid_shape(10), GridShape { columns: 4, rows: 3 });
        assert_eq!(
            calculate_grid_shape(100),
            GridShape {
                columns: 10,
                rows: 10
            }
        );
    }

    #[test]
    fn grid_shape_empty() {
        assert_eq!(calculate_grid_shape(0), GridShape { columns: 0, rows: 0 });
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn grid_shape_huge_count_does_not_overflow() {
        let shape = calculate_grid_shape(usize::MAX);
        assert_eq!(shape.columns, 1 << 32);
        assert_eq!(shape.rows, 1 << 32);
        assert_eq!(shape.capacity(), usize::MAX);
    }

    #[test]
    fn cell_offsets_are_row_major() {
        let offsets: Vec<_> = (0..5).map(|i| calculate_cell_offset(i, 3, 4200)).collect();
        assert_eq!(
            offsets,
            vec![(0, 0), (4200, 0), (8400, 0), (0, 4200), (4200, 4200)]
        );
    }

    // =========================================================================
    // calculate_dynamic_border tests
    // =========================================================================

    #[test]
    fn dynamic_border_anchor_values() {
        let scale = BorderScale::default();
        assert_eq!(calculate_dynamic_border(1, &scale), 1000);
        assert_eq!(calculate_dynamic_border(2, &scale), 1000);
        assert_eq!(calculate_dynamic_border(6, &scale), 600);
        assert_eq!(calculate_dynamic_border(10, &scale), 200);
        assert_eq!(calculate_dynamic_border(25, &scale), 200);
    }

    #[test]
    fn dynamic_border_truncates() {
        // 200 + 800 * 7 / 8 = 900 exactly; 200 + 800 * 5 / 8 = 700
        let scale = BorderScale::default();
        assert_eq!(calculate_dynamic_border(3, &scale), 900);
        assert_eq!(calculate_dynamic_border(5, &scale), 700);

        let odd = BorderScale {
            min_border: 0,
            max_border: 10,
            min_columns: 0,
            max_columns: 3,
        };
        // 10 * 2 / 3 = 6.67 → 6
        assert_eq!(calculate_dynamic_border(1, &odd), 6);
    }

    #[test]
    fn dynamic_border_is_non_increasing() {
        let scale = BorderScale::default();
        let values: Vec<u32> = (1..=20)
            .map(|c| calculate_dynamic_border(c, &scale))
            .collect();
        for pair in values.windows(2) {
            assert!(pair[0] >= pair[1], "{values:?}");
        }
        assert!(values.iter().all(|&v| (200..=1000).contains(&v)));
    }

    // =========================================================================
    // calculate_framed_dimensions tests
    // =========================================================================

    #[test]
    fn framed_landscape_composite() {
        // 12600x8400 with 200px frame → interior long edge 9600
        let (w, h) = calculate_framed_dimensions((12600, 8400), 10000, 200);
        assert!((9599..=9600).contains(&w));
        assert!((6399..=6400).contains(&h));
    }

    #[test]
    fn framed_square_composite_is_close_to_target() {
        let (w, h) = calculate_framed_dimensions((8400, 8400), 10000, 1000);
        assert_eq!(w, h);
        let total = w + 2 * 1000;
        assert!((9998..=10000).contains(&total), "total {total}");
    }

    #[test]
    fn framed_never_collapses_to_zero() {
        assert_eq!(calculate_framed_dimensions((100, 1), 50, 20), (10, 1));
    }

    #[test]
    fn framed_with_oversized_border_is_minimal() {
        assert_eq!(
            calculate_framed_dimensions((8400, 8400), u32::MAX, 3_000_000_000),
            (1, 1)
        );
    }
}
