//! Generic 2x2-neighbourhood interpolation for arbitrary step ratios.
//!
//! Distances are measured in fractional source-index space from the target
//! sample to the four surrounding source samples, named by (row, col) offset:
//!
//! ```text
//!   00 -- 01      row jR
//!    |    |
//!   10 -- 11      row jR + 1
//! ```
//!
//! Nearest neighbour copies the closest corner. Weighted average uses
//! `w = 1 / d^2`, except that a corner at zero distance takes the full weight.

use rayon::prelude::*;

use super::{PlaneShape, ResampleMode};
use crate::mapping::GridMapping;
use crate::raster::min_max;

/// Lower/upper source index along one axis and the signed offsets to each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisStencil {
    pub lo: usize,
    pub hi: usize,
    pub d_lo: f32,
    pub d_hi: f32,
}

impl AxisStencil {
    /// Stencil for fractional index `g` on an axis of `len` samples.
    ///
    /// `None` when `g` is NaN or its floor is not in `[0, len - 1)`. A
    /// single-sample axis collapses both neighbours onto index 0.
    pub fn new(g: f32, len: usize) -> Option<Self> {
        if g.is_nan() {
            return None;
        }
        if len == 1 {
            return (g == 0.0).then_some(Self {
                lo: 0,
                hi: 0,
                d_lo: 0.0,
                d_hi: 0.0,
            });
        }
        let r = g.floor();
        if r < 0.0 || r as usize >= len - 1 {
            return None;
        }
        Some(Self {
            lo: r as usize,
            hi: r as usize + 1,
            d_lo: g - r,
            d_hi: g - (r + 1.0),
        })
    }
}

/// Per-axis stencils shared by every plane of one raster.
#[derive(Clone, Debug)]
pub struct Stencils {
    pub x: Vec<Option<AxisStencil>>,
    pub y: Vec<Option<AxisStencil>>,
}

impl Stencils {
    pub fn new(mapping: &GridMapping, shape: PlaneShape) -> Self {
        Self {
            x: mapping.x.iter().map(|&g| AxisStencil::new(g, shape.cols)).collect(),
            y: mapping.y.iter().map(|&g| AxisStencil::new(g, shape.rows)).collect(),
        }
    }
}

/// Fill `dst` (row-major, `stencils.y.len()` x `stencils.x.len()`, pre-filled
/// with NaN) from `src`.
pub fn resample(
    src: &[f32],
    shape: PlaneShape,
    stencils: &Stencils,
    mode: ResampleMode,
    dst: &mut [f32],
    parallel: bool,
) {
    debug_assert_eq!(src.len(), shape.rows * shape.cols);
    debug_assert_eq!(dst.len(), stencils.x.len() * stencils.y.len());

    let cols = stencils.x.len();
    if cols == 0 {
        return;
    }

    let fill_row = |(j, row): (usize, &mut [f32])| {
        let Some(sy) = stencils.y[j] else {
            return;
        };
        for (out, sx) in row.iter_mut().zip(&stencils.x) {
            if let Some(sx) = sx {
                *out = interpolate(src, shape, sx, &sy, mode);
            }
        }
    };

    if parallel {
        dst.par_chunks_mut(cols).enumerate().for_each(fill_row);
    } else {
        dst.chunks_mut(cols).enumerate().for_each(fill_row);
    }
}

fn interpolate(
    src: &[f32],
    shape: PlaneShape,
    sx: &AxisStencil,
    sy: &AxisStencil,
    mode: ResampleMode,
) -> f32 {
    let corners = [
        src[sy.lo * shape.cols + sx.lo],
        src[sy.lo * shape.cols + sx.hi],
        src[sy.hi * shape.cols + sx.lo],
        src[sy.hi * shape.cols + sx.hi],
    ];
    let dists = [
        sx.d_lo * sx.d_lo + sy.d_lo * sy.d_lo,
        sx.d_hi * sx.d_hi + sy.d_lo * sy.d_lo,
        sx.d_lo * sx.d_lo + sy.d_hi * sy.d_hi,
        sx.d_hi * sx.d_hi + sy.d_hi * sy.d_hi,
    ];

    match mode {
        ResampleMode::NearestNeighbor => {
            let nearest = min_max(&dists).map_or(0, |mm| mm.min_index);
            corners[nearest]
        }
        ResampleMode::WeightedAverage => weighted(&corners, &dists),
    }
}

fn weighted(corners: &[f32; 4], dists: &[f32; 4]) -> f32 {
    let mut weights = dists.map(|d| 1.0 / d);
    let mut sum: f32 = weights.iter().sum();

    // target on a source sample: 1/0 would poison the sum
    if let Some(hit) = weights.iter().position(|w| w.is_infinite()) {
        weights = [0.0; 4];
        weights[hit] = 1.0;
        sum = 1.0;
    }

    let mut acc = 0.0_f32;
    for (&w, &v) in weights.iter().zip(corners) {
        if w != 0.0 {
            acc += w * v;
        }
    }
    acc / sum
}
