use crate::error::{RegridError, Result};
use crate::grid::RegularGrid2D;

/// Per-axis affine map from native Fixed Grid Frame coordinates to view angles
/// in radians:
///   lambda = x * scale_x + offset_x
///   theta  = y * scale_y + offset_y
///
/// Rasters from different instruments (or different bands of one instrument)
/// must be brought into this shared (lambda, theta) domain before their grids
/// can be compared or regridded onto each other.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularTransform {
    pub scale_x: f64,
    pub offset_x: f64,
    pub scale_y: f64,
    pub offset_y: f64,
}

impl AngularTransform {
    pub fn new(scale_x: f64, offset_x: f64, scale_y: f64, offset_y: f64) -> Self {
        Self {
            scale_x,
            offset_x,
            scale_y,
            offset_y,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 1.0, 0.0)
    }

    /// Apply to a single point: (x, y) -> (lambda, theta).
    pub fn apply_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale_x + self.offset_x,
            y * self.scale_y + self.offset_y,
        )
    }

    /// Inverse of [`apply_point`](Self::apply_point): (lambda, theta) -> (x, y).
    pub fn inverse_point(&self, lambda: f64, theta: f64) -> Result<(f64, f64)> {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return Err(RegridError::InvalidAxis(
                "angular transform with zero scale is not invertible".into(),
            ));
        }
        Ok((
            (lambda - self.offset_x) / self.scale_x,
            (theta - self.offset_y) / self.scale_y,
        ))
    }

    /// Re-express a grid in the angular domain. Lengths are unchanged and no
    /// values are touched; only the axis endpoints move.
    pub fn transform(&self, grid: &RegularGrid2D) -> Result<RegularGrid2D> {
        Ok(RegularGrid2D::new(
            grid.x.scaled(self.scale_x, self.offset_x)?,
            grid.y.scaled(self.scale_y, self.offset_y)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ABI 2 km full-disk style scale/offset (radians per FGF index)
    const SCALE_X: f64 = 5.6e-5;
    const OFFSET_X: f64 = -0.151844;
    const SCALE_Y: f64 = -5.6e-5;
    const OFFSET_Y: f64 = 0.151844;

    #[test]
    fn test_transform_endpoints() {
        let grid = RegularGrid2D::from_bounds((0.0, 5423.0, 5424), (0.0, 5423.0, 5424)).unwrap();
        let t = AngularTransform::new(SCALE_X, OFFSET_X, SCALE_Y, OFFSET_Y);
        let out = t.transform(&grid).unwrap();

        assert_relative_eq!(out.x.first(), OFFSET_X);
        assert_relative_eq!(out.x.last(), 5423.0 * SCALE_X + OFFSET_X, epsilon = 1e-12);
        assert_relative_eq!(out.y.first(), OFFSET_Y);
        assert_relative_eq!(out.y.last(), 5423.0 * SCALE_Y + OFFSET_Y, epsilon = 1e-12);
    }

    #[test]
    fn test_shape_preserved() {
        let grid = RegularGrid2D::from_bounds((10.0, 20.0, 11), (5.0, 1.0, 3)).unwrap();
        for t in [
            AngularTransform::identity(),
            AngularTransform::new(2.0, -1.0, 0.5, 3.0),
            AngularTransform::new(-1e-4, 0.1, 1e-4, -0.1),
        ] {
            let out = t.transform(&grid).unwrap();
            assert_eq!(out.x.length(), grid.x.length());
            assert_eq!(out.y.length(), grid.y.length());
        }
    }

    #[test]
    fn test_zero_scale_collapses_axis() {
        let grid = RegularGrid2D::from_bounds((0.0, 9.0, 10), (0.0, 9.0, 10)).unwrap();
        let t = AngularTransform::new(0.0, 1.0, 1.0, 0.0);
        assert!(matches!(
            t.transform(&grid),
            Err(RegridError::InvalidAxis(_))
        ));
    }

    #[test]
    fn test_point_roundtrip() {
        let t = AngularTransform::new(SCALE_X, OFFSET_X, SCALE_Y, OFFSET_Y);
        let (l, th) = t.apply_point(1000.0, 2000.0);
        let (x, y) = t.inverse_point(l, th).unwrap();
        assert_relative_eq!(x, 1000.0, epsilon = 1e-6);
        assert_relative_eq!(y, 2000.0, epsilon = 1e-6);
    }
}
