//! Integer-ratio block resampler (2x / 4x fast path).
//!
//! Each target cell reads the source block anchored at its floored source
//! index. Weighted average is the 2x2 box mean; nearest neighbour copies the
//! sample one row below the anchor (`kR + cols`). That row offset is kept for
//! output compatibility with historical products even though it looks like it
//! should be the anchor itself.

use rayon::prelude::*;

use super::{PlaneShape, ResampleMode};

/// Fill `dst` (row-major, `y_idx.len()` x `x_idx.len()`, pre-filled with NaN).
///
/// `x_idx`/`y_idx` are floored source indices per target column/row with `-1`
/// for uncovered samples. Cells whose block would leave the source stay NaN.
pub fn resample(
    src: &[f32],
    shape: PlaneShape,
    x_idx: &[isize],
    y_idx: &[isize],
    mode: ResampleMode,
    dst: &mut [f32],
    parallel: bool,
) {
    debug_assert_eq!(src.len(), shape.rows * shape.cols);
    debug_assert_eq!(dst.len(), x_idx.len() * y_idx.len());

    let cols = x_idx.len();
    if cols == 0 {
        return;
    }

    let fill_row = |(j, row): (usize, &mut [f32])| {
        let Some(jr) = in_range(y_idx[j], shape.rows) else {
            return;
        };
        for (out, &ix) in row.iter_mut().zip(x_idx) {
            let Some(ir) = in_range(ix, shape.cols) else {
                continue;
            };
            if let Some(v) = block_value(src, shape, ir, jr, mode) {
                *out = v;
            }
        }
    };

    if parallel {
        dst.par_chunks_mut(cols).enumerate().for_each(fill_row);
    } else {
        dst.chunks_mut(cols).enumerate().for_each(fill_row);
    }
}

fn in_range(idx: isize, len: usize) -> Option<usize> {
    if idx >= 0 && (idx as usize) < len {
        Some(idx as usize)
    } else {
        None
    }
}

fn block_value(
    src: &[f32],
    shape: PlaneShape,
    ir: usize,
    jr: usize,
    mode: ResampleMode,
) -> Option<f32> {
    let k = jr * shape.cols + ir;
    match mode {
        ResampleMode::NearestNeighbor => {
            if jr + 1 >= shape.rows {
                return None;
            }
            Some(src[k + shape.cols])
        }
        ResampleMode::WeightedAverage => {
            if ir + 1 >= shape.cols || jr + 1 >= shape.rows {
                return None;
            }
            let sum = src[k] + src[k + 1] + src[k + shape.cols] + src[k + shape.cols + 1];
            Some(sum / 4.0)
        }
    }
}
