//! Regular 1-D axes and the rectilinear 2-D grids built from them.

use crate::error::{RegridError, Result};

/// Relative tolerance on spacing used when classifying coordinate vectors.
const SPACING_TOLERANCE: f64 = 1e-6;

/// A regularly spaced 1-D axis: `length` samples from `first` to `last` inclusive.
///
/// `first > last` is allowed (descending axis, e.g. a north-up row coordinate).
/// A single-sample axis sits at `first`; its `last` is normalised to `first`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "AxisBounds"))]
pub struct RegularAxis {
    first: f64,
    last: f64,
    length: usize,
}

impl RegularAxis {
    pub fn new(first: f64, last: f64, length: usize) -> Result<Self> {
        if length < 1 {
            return Err(RegridError::InvalidAxis(format!(
                "length must be >= 1, got {length}"
            )));
        }
        if !first.is_finite() || !last.is_finite() {
            return Err(RegridError::InvalidAxis(format!(
                "endpoints must be finite, got [{first}, {last}]"
            )));
        }
        if length > 1 && first == last {
            return Err(RegridError::InvalidAxis(format!(
                "zero step: first == last == {first} with length {length}"
            )));
        }
        let last = if length == 1 { first } else { last };
        Ok(Self {
            first,
            last,
            length,
        })
    }

    pub fn first(&self) -> f64 {
        self.first
    }

    pub fn last(&self) -> f64 {
        self.last
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Spacing between consecutive samples, `None` for a single-sample axis.
    pub fn step(&self) -> Option<f64> {
        if self.length > 1 {
            Some((self.last - self.first) / (self.length - 1) as f64)
        } else {
            None
        }
    }

    /// Closed interval covered by the axis as `(lo, hi)`, independent of direction.
    pub fn bounds(&self) -> (f64, f64) {
        (self.first.min(self.last), self.first.max(self.last))
    }

    /// Sample coordinates `first + i * step`, evaluated in f64 and narrowed to f32.
    pub fn samples(&self) -> Vec<f32> {
        match self.step() {
            Some(step) => (0..self.length)
                .map(|i| (self.first + i as f64 * step) as f32)
                .collect(),
            None => vec![self.first as f32],
        }
    }

    /// Same axis with both endpoints mapped through `v * scale + offset`.
    pub fn scaled(&self, scale: f64, offset: f64) -> Result<Self> {
        Self::new(
            self.first * scale + offset,
            self.last * scale + offset,
            self.length,
        )
    }
}

/// Unchecked wire form of [`RegularAxis`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct AxisBounds {
    first: f64,
    last: f64,
    length: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<AxisBounds> for RegularAxis {
    type Error = RegridError;

    fn try_from(raw: AxisBounds) -> Result<Self> {
        Self::new(raw.first, raw.last, raw.length)
    }
}

/// Rectilinear raster domain: samples are row-major, `idx = row * x.length() + col`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegularGrid2D {
    pub x: RegularAxis,
    pub y: RegularAxis,
}

impl RegularGrid2D {
    pub fn new(x: RegularAxis, y: RegularAxis) -> Self {
        Self { x, y }
    }

    /// Build from `(first, last, length)` triples for each axis.
    pub fn from_bounds(x: (f64, f64, usize), y: (f64, f64, usize)) -> Result<Self> {
        Ok(Self {
            x: RegularAxis::new(x.0, x.1, x.2)?,
            y: RegularAxis::new(y.0, y.1, y.2)?,
        })
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.y.length(), self.x.length())
    }

    pub fn len(&self) -> usize {
        self.x.length() * self.y.length()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact, epsilon-free comparison of both axes.
    pub fn equals(&self, other: &RegularGrid2D) -> bool {
        self == other
    }

    /// Error unless `actual` matches this grid's cell count.
    pub fn check_len(&self, actual: usize) -> Result<()> {
        let expected = self.len();
        if actual != expected {
            return Err(RegridError::ShapeMismatch { expected, actual });
        }
        Ok(())
    }
}

/// Domain of a raster as supplied by a caller.
///
/// Only `Regular` domains can be regridded here; `Irregular` ones are
/// rectilinear but unevenly spaced and need a general resampler.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    Regular(RegularGrid2D),
    Irregular { x: Vec<f64>, y: Vec<f64> },
}

impl Domain {
    /// Classify per-axis coordinate vectors as a regular grid when evenly spaced.
    pub fn from_coordinates(x: &[f64], y: &[f64]) -> Result<Self> {
        match (regular_axis(x)?, regular_axis(y)?) {
            (Some(ax), Some(ay)) => Ok(Domain::Regular(RegularGrid2D::new(ax, ay))),
            _ => Ok(Domain::Irregular {
                x: x.to_vec(),
                y: y.to_vec(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Domain::Regular(grid) => grid.len(),
            Domain::Irregular { x, y } => x.len() * y.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_regular(&self) -> Result<&RegularGrid2D> {
        match self {
            Domain::Regular(grid) => Ok(grid),
            Domain::Irregular { x, y } => Err(RegridError::UnsupportedDomain(format!(
                "domain of {}x{} irregularly spaced samples must be resampled with a general resampler",
                x.len(),
                y.len()
            ))),
        }
    }
}

impl From<RegularGrid2D> for Domain {
    fn from(grid: RegularGrid2D) -> Self {
        Domain::Regular(grid)
    }
}

fn regular_axis(coords: &[f64]) -> Result<Option<RegularAxis>> {
    let (first, last) = match (coords.first(), coords.last()) {
        (Some(&f), Some(&l)) => (f, l),
        _ => {
            return Err(RegridError::InvalidAxis(
                "coordinate vector is empty".into(),
            ))
        }
    };
    if coords.len() == 1 {
        return RegularAxis::new(first, last, 1).map(Some);
    }
    let step = (last - first) / (coords.len() - 1) as f64;
    let tol = step.abs() * SPACING_TOLERANCE;
    let evenly_spaced = coords
        .iter()
        .enumerate()
        .all(|(i, &c)| (c - (first + i as f64 * step)).abs() <= tol);
    if !evenly_spaced {
        return Ok(None);
    }
    RegularAxis::new(first, last, coords.len()).map(Some)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_axis_deserialize_validates() {
        let ax: RegularAxis =
            serde_json::from_str(r#"{"first": 0.0, "last": 9.0, "length": 10}"#).unwrap();
        assert_eq!(ax, RegularAxis::new(0.0, 9.0, 10).unwrap());

        for bad in [
            r#"{"first": 0.0, "last": 0.0, "length": 0}"#,
            r#"{"first": 2.0, "last": 2.0, "length": 5}"#,
        ] {
            assert!(serde_json::from_str::<RegularAxis>(bad).is_err());
        }
    }

    #[test]
    fn test_grid_deserialize_validates_axes() {
        let bad = r#"{
            "x": {"first": 0.0, "last": 3.0, "length": 4},
            "y": {"first": 0.0, "last": 0.0, "length": 0}
        }"#;
        let err = serde_json::from_str::<RegularGrid2D>(bad).unwrap_err();
        assert!(err.to_string().contains("length must be >= 1"));

        let grid = RegularGrid2D::from_bounds((0.0, 3.0, 4), (1.0, 0.0, 2)).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<RegularGrid2D>(&json).unwrap(), grid);
    }
}
