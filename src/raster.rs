//! Multi-plane rasters and per-plane value utilities.

use ndarray::{Array2, ArrayView2};

use crate::angular::AngularTransform;
use crate::error::{RegridError, Result};
use crate::grid::{Domain, RegularGrid2D};

/// One or more f32 value planes sharing a domain. Each plane is row-major
/// with `domain.len()` samples; NaN marks a missing sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    pub domain: Domain,
    pub planes: Vec<Vec<f32>>,
}

impl Raster {
    pub fn new(domain: impl Into<Domain>, planes: Vec<Vec<f32>>) -> Result<Self> {
        let domain = domain.into();
        if planes.is_empty() {
            return Err(RegridError::ShapeMismatch {
                expected: 1,
                actual: 0,
            });
        }
        let expected = domain.len();
        for plane in &planes {
            if plane.len() != expected {
                return Err(RegridError::ShapeMismatch {
                    expected,
                    actual: plane.len(),
                });
            }
        }
        Ok(Self { domain, planes })
    }

    /// Single-plane raster on a regular grid.
    pub fn single(grid: RegularGrid2D, values: Vec<f32>) -> Result<Self> {
        Self::new(grid, vec![values])
    }

    /// Single-plane raster from a `(rows, cols)` array. A mismatch reports the
    /// first disagreeing dimension, rows before columns.
    pub fn from_array2(grid: RegularGrid2D, values: Array2<f32>) -> Result<Self> {
        let ((rows, cols), (want_rows, want_cols)) = (values.dim(), grid.shape());
        if rows != want_rows {
            return Err(RegridError::ShapeMismatch {
                expected: want_rows,
                actual: rows,
            });
        }
        if cols != want_cols {
            return Err(RegridError::ShapeMismatch {
                expected: want_cols,
                actual: cols,
            });
        }
        let values = match values.as_slice() {
            Some(contiguous) => contiguous.to_vec(),
            None => values.iter().copied().collect(),
        };
        Self::single(grid, values)
    }

    pub fn grid(&self) -> Result<&RegularGrid2D> {
        self.domain.as_regular()
    }

    /// Plane `i` as a `(rows, cols)` view.
    pub fn plane_view(&self, i: usize) -> Option<ArrayView2<'_, f32>> {
        let grid = self.grid().ok()?;
        let plane = self.planes.get(i)?;
        ArrayView2::from_shape(grid.shape(), plane).ok()
    }

    /// Re-label the domain in view-angle radians. Planes are moved, not copied.
    pub fn to_angular(self, transform: &AngularTransform) -> Result<Self> {
        let grid = transform.transform(self.grid()?)?;
        Ok(Self {
            domain: Domain::Regular(grid),
            planes: self.planes,
        })
    }

    /// Replace `±Inf` with NaN in every plane; returns the number replaced.
    pub fn sanitize(&mut self) -> usize {
        self.planes
            .iter_mut()
            .map(|p| sanitize_non_finite(p))
            .sum()
    }
}

/// Replace `±Inf` with NaN in place; returns the number of samples replaced.
pub fn sanitize_non_finite(values: &mut [f32]) -> usize {
    let mut replaced = 0;
    for v in values.iter_mut().filter(|v| v.is_infinite()) {
        *v = f32::NAN;
        replaced += 1;
    }
    replaced
}

/// Extremes of the finite samples of a slice and where they first occur.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: f32,
    pub max: f32,
    pub min_index: usize,
    pub max_index: usize,
}

/// Min/max over finite values only; `None` when there are none.
pub fn min_max(values: &[f32]) -> Option<MinMax> {
    let mut found: Option<MinMax> = None;
    for (k, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        match found.as_mut() {
            None => {
                found = Some(MinMax {
                    min: v,
                    max: v,
                    min_index: k,
                    max_index: k,
                })
            }
            Some(mm) => {
                if v < mm.min {
                    mm.min = v;
                    mm.min_index = k;
                }
                if v > mm.max {
                    mm.max = v;
                    mm.max_index = k;
                }
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn grid_2x3() -> RegularGrid2D {
        RegularGrid2D::from_bounds((0.0, 2.0, 3), (0.0, 1.0, 2)).unwrap()
    }

    #[test]
    fn test_plane_length_checked() {
        let err = Raster::new(grid_2x3(), vec![vec![0.0; 6], vec![0.0; 5]]).unwrap_err();
        assert_eq!(
            err,
            RegridError::ShapeMismatch {
                expected: 6,
                actual: 5
            }
        );
        assert!(Raster::new(grid_2x3(), vec![]).is_err());
    }

    #[test]
    fn test_from_array2_and_view() {
        let arr = array![[1.0_f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let r = Raster::from_array2(grid_2x3(), arr.clone()).unwrap();
        assert_eq!(r.planes[0], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(r.plane_view(0).unwrap(), arr.view());
        assert!(r.plane_view(1).is_none());

        let transposed = arr.reversed_axes();
        assert_eq!(
            Raster::from_array2(grid_2x3(), transposed).unwrap_err(),
            RegridError::ShapeMismatch {
                expected: 2,
                actual: 3
            }
        );
        let narrow = array![[1.0_f32, 2.0], [3.0, 4.0]];
        assert_eq!(
            Raster::from_array2(grid_2x3(), narrow).unwrap_err(),
            RegridError::ShapeMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_to_angular_keeps_planes() {
        let r = Raster::single(grid_2x3(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let ptr = r.planes[0].as_ptr();
        let t = AngularTransform::new(2.0, 1.0, -1.0, 0.0);
        let a = r.to_angular(&t).unwrap();
        assert_eq!(a.planes[0].as_ptr(), ptr);
        let g = a.grid().unwrap();
        assert_eq!((g.x.first(), g.x.last()), (1.0, 5.0));
        assert_eq!((g.y.first(), g.y.last()), (0.0, -1.0));
    }

    #[test]
    fn test_sanitize() {
        let mut v = vec![1.0, f32::INFINITY, f32::NAN, f32::NEG_INFINITY];
        assert_eq!(sanitize_non_finite(&mut v), 2);
        assert_eq!(v[0], 1.0);
        assert!(v[1..].iter().all(|x| x.is_nan()));

        let mut r = Raster::new(
            grid_2x3(),
            vec![vec![f32::INFINITY; 6], vec![0.0; 6]],
        )
        .unwrap();
        assert_eq!(r.sanitize(), 6);
    }

    #[test]
    fn test_min_max() {
        let mm = min_max(&[f32::NAN, 3.0, -2.0, f32::INFINITY, 7.0, -2.0]).unwrap();
        assert_eq!((mm.min, mm.min_index), (-2.0, 2));
        assert_eq!((mm.max, mm.max_index), (7.0, 4));
        assert!(min_max(&[f32::NAN, f32::NEG_INFINITY]).is_none());
        assert!(min_max(&[]).is_none());
    }
}
