//! Choice between the integer-ratio block fast path and generic interpolation.

use crate::grid::RegularGrid2D;
use crate::regrid::RegridOptions;

/// Integer step ratio handled by the block resampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockRatio {
    Two,
    Four,
}

impl BlockRatio {
    pub fn factor(&self) -> f64 {
        match self {
            Self::Two => 2.0,
            Self::Four => 4.0,
        }
    }
}

/// How a source grid is transferred onto a target grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResamplePath {
    /// Grids are identical; the input is returned as is.
    Identity,
    /// Aligned 2x or 4x "upsample" (target step wider than source step).
    Fast(BlockRatio),
    /// Inverse-distance / nearest interpolation over the 2x2 neighbourhood.
    Generic,
}

/// Target step over source step, per axis. `None` if either grid has a
/// single-sample axis.
pub fn step_ratios(source: &RegularGrid2D, target: &RegularGrid2D) -> Option<(f64, f64)> {
    let rx = target.x.step()? / source.x.step()?;
    let ry = target.y.step()? / source.y.step()?;
    Some((rx, ry))
}

/// Classify a grid transfer.
///
/// "Upsample" follows the historical naming: it means the target index
/// spacing is wider than the source's on both axes (fine source, coarse
/// target). The fast path additionally needs the first target sample to sit on
/// a source sample or half-way between two, and the step ratio to be 2 or 4 to
/// within a tolerance that accumulates over the target length.
pub fn decide(
    source: &RegularGrid2D,
    target: &RegularGrid2D,
    options: &RegridOptions,
) -> ResamplePath {
    if source.equals(target) {
        return ResamplePath::Identity;
    }

    let Some((rx, ry)) = step_ratios(source, target) else {
        return ResamplePath::Generic;
    };

    let upsample = rx > 1.0 && ry > 1.0;
    if !upsample {
        return ResamplePath::Generic;
    }

    if !is_half_step_aligned(source, target, options.offset_tolerance) {
        return ResamplePath::Generic;
    }

    let tol = f64::from(options.accum_tolerance);
    let (len_x, len_y) = (target.x.length() as f64, target.y.length() as f64);
    let ratio_is = |factor: f64| (rx - factor).abs() * len_x < tol && (ry - factor).abs() * len_y < tol;

    if ratio_is(BlockRatio::Four.factor()) {
        ResamplePath::Fast(BlockRatio::Four)
    } else if ratio_is(BlockRatio::Two.factor()) {
        ResamplePath::Fast(BlockRatio::Two)
    } else {
        ResamplePath::Generic
    }
}

/// Offset between first samples, modulo half a source step, is within tolerance
/// on both axes.
fn is_half_step_aligned(source: &RegularGrid2D, target: &RegularGrid2D, tolerance: f64) -> bool {
    [(&source.x, &target.x), (&source.y, &target.y)]
        .into_iter()
        .all(|(s, t)| match s.step() {
            Some(step) => ((t.first() - s.first()).abs() % (step / 2.0)) < tolerance,
            None => false,
        })
}
