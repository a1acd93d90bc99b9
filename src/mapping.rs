//! Target-coordinate to source-index mapping.
//!
//! The mapping is clamped: a coordinate outside the closed interval covered by
//! the source axis maps to NaN rather than to an extrapolated index, so the
//! corresponding output cell ends up missing.

use crate::grid::{RegularAxis, RegularGrid2D};

/// Map target coordinates to fractional indices on `source`.
///
/// Returns `(v - first) / step` for `v` inside `[min(first, last), max(first, last)]`
/// and NaN elsewhere. The interval test is done in f32, matching the precision
/// of the coordinates. For a single-sample axis `v == first` maps to `0.0`.
pub fn value_to_grid(source: &RegularAxis, values: &[f32]) -> Vec<f32> {
    let first = source.first();
    let mut lo = source.first() as f32;
    let mut hi = source.last() as f32;
    if hi < lo {
        std::mem::swap(&mut lo, &mut hi);
    }

    match source.step() {
        Some(step) => {
            let inv_step = 1.0 / step;
            values
                .iter()
                .map(|&v| {
                    if lo <= v && v <= hi {
                        ((v as f64 - first) * inv_step) as f32
                    } else {
                        f32::NAN
                    }
                })
                .collect()
        }
        None => {
            let only = first as f32;
            values
                .iter()
                .map(|&v| if v == only { 0.0 } else { f32::NAN })
                .collect()
        }
    }
}

/// Floor fractional indices, using `-1` for NaN.
pub fn floor_indices(grid: &[f32]) -> Vec<isize> {
    grid.iter()
        .map(|&g| if g.is_nan() { -1 } else { g.floor() as isize })
        .collect()
}

/// Fractional source indices for every target column (`x`) and row (`y`).
///
/// Both axes go through the same routine; a 2-D mapping is the outer product
/// of the two 1-D mappings.
#[derive(Clone, Debug, PartialEq)]
pub struct GridMapping {
    pub x: Vec<f32>,
    pub y: Vec<f32>,
}

impl GridMapping {
    pub fn new(source: &RegularGrid2D, target: &RegularGrid2D) -> Self {
        Self {
            x: value_to_grid(&source.x, &target.x.samples()),
            y: value_to_grid(&source.y, &target.y.samples()),
        }
    }

    /// Floored indices `(x, y)` with `-1` marking uncovered samples.
    pub fn floored(&self) -> (Vec<isize>, Vec<isize>) {
        (floor_indices(&self.x), floor_indices(&self.y))
    }

    /// Number of target cells whose source location is known on both axes.
    pub fn covered_cells(&self) -> usize {
        let nx = self.x.iter().filter(|v| !v.is_nan()).count();
        let ny = self.y.iter().filter(|v| !v.is_nan()).count();
        nx * ny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inside_interval() {
        let ax = RegularAxis::new(0.0, 9.0, 10).unwrap();
        let g = value_to_grid(&ax, &[0.0, 0.5, 4.25, 9.0]);
        assert_relative_eq!(g[0], 0.0);
        assert_relative_eq!(g[1], 0.5);
        assert_relative_eq!(g[2], 4.25);
        assert_relative_eq!(g[3], 9.0);
    }

    #[test]
    fn test_outside_interval_is_nan() {
        let ax = RegularAxis::new(0.0, 9.0, 10).unwrap();
        let g = value_to_grid(&ax, &[-0.001, 9.001, -100.0, f32::NAN]);
        assert!(g.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_descending_axis() {
        // first > last: interval is still [0, 10], indices count from `first`
        let ax = RegularAxis::new(10.0, 0.0, 11).unwrap();
        let g = value_to_grid(&ax, &[10.0, 7.5, 0.0, 10.5, -0.5]);
        assert_relative_eq!(g[0], 0.0);
        assert_relative_eq!(g[1], 2.5);
        assert_relative_eq!(g[2], 10.0);
        assert!(g[3].is_nan());
        assert!(g[4].is_nan());
    }

    #[test]
    fn test_single_sample_axis() {
        let ax = RegularAxis::new(2.0, 2.0, 1).unwrap();
        let g = value_to_grid(&ax, &[2.0, 2.5]);
        assert_eq!(g[0], 0.0);
        assert!(g[1].is_nan());
    }

    #[test]
    fn test_single_sample_axis_descending_bounds() {
        let ax = RegularAxis::new(5.0, 0.0, 1).unwrap();
        let g = value_to_grid(&ax, &[5.0, 0.0]);
        assert_eq!(g[0], 0.0);
        assert!(g[1].is_nan());
    }

    #[test]
    fn test_floor_indices() {
        let idx = floor_indices(&[0.0, 0.99, 3.5, f32::NAN]);
        assert_eq!(idx, vec![0, 0, 3, -1]);
    }

    #[test]
    fn test_grid_mapping() {
        let src = RegularGrid2D::from_bounds((0.0, 9.0, 10), (0.0, 4.0, 5)).unwrap();
        let dst = RegularGrid2D::from_bounds((1.0, 11.0, 6), (0.0, 4.0, 3)).unwrap();
        let m = GridMapping::new(&src, &dst);
        assert_eq!(m.x.len(), 6);
        assert_eq!(m.y.len(), 3);
        // x samples 1,3,5,7,9,11: the last is outside the source
        assert!(m.x[5].is_nan());
        assert_eq!(m.covered_cells(), 5 * 3);

        let (xi, yi) = m.floored();
        assert_eq!(xi, vec![1, 3, 5, 7, 9, -1]);
        assert_eq!(yi, vec![0, 2, 4]);
    }
}
