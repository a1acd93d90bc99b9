//! PyO3 bindings for single-array regridding.

use ndarray::Array2;
use numpy::{PyArray2, PyReadonlyArray2, PyReadwriteArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::grid::RegularGrid2D;
use crate::raster::{sanitize_non_finite, Raster};
use crate::regrid::RegridEngine;
use crate::resample::ResampleMode;

pub(super) fn parse_mode(mode: &str) -> PyResult<ResampleMode> {
    ResampleMode::from_name(mode)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown resample mode: {mode}")))
}

/// Grid for an array of `shape` whose axes span `x` and `y` as (first, last).
pub(super) fn grid_for_shape(
    shape: (usize, usize),
    x: (f64, f64),
    y: (f64, f64),
) -> PyResult<RegularGrid2D> {
    let (rows, cols) = shape;
    RegularGrid2D::from_bounds((x.0, x.1, cols), (y.0, y.1, rows))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Regrid a 2D f32 array from one regular grid onto another.
///
/// Args:
///     src: Input 2D array (f32), shape (rows, cols) matching `src_y`/`src_x`.
///     src_x: Source x axis as (first, last); length is the column count.
///     src_y: Source y axis as (first, last); length is the row count.
///     dst_x: Target x axis as (first, last, length).
///     dst_y: Target y axis as (first, last, length).
///     mode: "nearest_neighbor" or "weighted_average".
///
/// Returns:
///     2D array (f32) on the target grid, NaN where the source has no coverage.
#[pyfunction]
#[pyo3(signature = (src, src_x, src_y, dst_x, dst_y, mode="weighted_average"))]
pub fn regrid_array<'py>(
    py: Python<'py>,
    src: PyReadonlyArray2<'py, f32>,
    src_x: (f64, f64),
    src_y: (f64, f64),
    dst_x: (f64, f64, usize),
    dst_y: (f64, f64, usize),
    mode: &str,
) -> PyResult<Bound<'py, PyArray2<f32>>> {
    let mode = parse_mode(mode)?;
    let src_array: Array2<f32> = src.as_array().to_owned();
    let src_grid = grid_for_shape(src_array.dim(), src_x, src_y)?;
    let dst_grid = RegularGrid2D::from_bounds(dst_x, dst_y)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let result: Array2<f32> = py.allow_threads(move || {
        let raster = Raster::from_array2(src_grid, src_array)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let mut out = RegridEngine::default()
            .resample_raster(&raster, &dst_grid, mode)
            .map_err(|e| PyValueError::new_err(e.to_string()))?
            .into_owned();
        let plane = out.planes.swap_remove(0);
        Array2::from_shape_vec(dst_grid.shape(), plane)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(PyArray2::from_owned_array(py, result))
}

/// Replace +/-inf with NaN in place.
///
/// Returns:
///     Number of samples replaced.
#[pyfunction]
pub fn sanitize<'py>(mut values: PyReadwriteArray2<'py, f32>) -> usize {
    let mut view = values.as_array_mut();
    match view.as_slice_mut() {
        Some(contiguous) => sanitize_non_finite(contiguous),
        None => view.iter_mut().map(|v| sanitize_non_finite(std::slice::from_mut(v))).sum(),
    }
}
