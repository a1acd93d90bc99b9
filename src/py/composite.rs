//! PyO3 binding for RGB composites.

use ndarray::Array3;
use numpy::{PyArray3, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use super::regrid::{grid_for_shape, parse_mode};
use crate::composite;
use crate::grid::RegularGrid2D;
use crate::raster::Raster;
use crate::regrid::RegridEngine;

type Axes = ((f64, f64), (f64, f64));

fn band(values: PyReadonlyArray2<'_, f32>, axes: Axes) -> PyResult<Raster> {
    let array = values.as_array().to_owned();
    let grid = grid_for_shape(array.dim(), axes.0, axes.1)?;
    Raster::from_array2(grid, array).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Combine three single-band arrays into one RGB stack on a shared grid.
///
/// Args:
///     red, green, blue: 2D f32 arrays.
///     red_axes, green_axes, blue_axes: ((x_first, x_last), (y_first, y_last))
///         for each band, in the same angular coordinate space.
///     dst: Optional target grid as ((x_first, x_last, nx), (y_first, y_last, ny)).
///         Defaults to the red band's grid.
///     mode: "nearest_neighbor" or "weighted_average".
///
/// Returns:
///     3D array (3, rows, cols); a pixel missing in any band is NaN in all.
#[pyfunction]
#[pyo3(signature = (red, red_axes, green, green_axes, blue, blue_axes, dst=None, mode="weighted_average"))]
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn combine_rgb<'py>(
    py: Python<'py>,
    red: PyReadonlyArray2<'py, f32>,
    red_axes: Axes,
    green: PyReadonlyArray2<'py, f32>,
    green_axes: Axes,
    blue: PyReadonlyArray2<'py, f32>,
    blue_axes: Axes,
    dst: Option<((f64, f64, usize), (f64, f64, usize))>,
    mode: &str,
) -> PyResult<Bound<'py, PyArray3<f32>>> {
    let mode = parse_mode(mode)?;
    let red = band(red, red_axes)?;
    let green = band(green, green_axes)?;
    let blue = band(blue, blue_axes)?;
    let target = match dst {
        Some((x, y)) => {
            RegularGrid2D::from_bounds(x, y).map_err(|e| PyValueError::new_err(e.to_string()))?
        }
        None => *red.grid().map_err(|e| PyValueError::new_err(e.to_string()))?,
    };

    let result: Array3<f32> = py.allow_threads(move || {
        let rgb = composite::combine_rgb(&RegridEngine::default(), &red, &green, &blue, &target, mode)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let (rows, cols) = target.shape();
        Array3::from_shape_vec((3, rows, cols), rgb.planes.concat())
            .map_err(|e| PyValueError::new_err(e.to_string()))
    })?;

    Ok(PyArray3::from_owned_array(py, result))
}
