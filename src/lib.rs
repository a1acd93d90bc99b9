//! Grid transfer between regular rasters on the geostationary Fixed Grid Frame.
//!
//! Values are moved from a source [`RegularGrid2D`] onto a target grid in the
//! same (usually view-angle radians) coordinate space. Aligned 2x/4x transfers
//! take an exact block fast path; everything else goes through a NaN-safe
//! inverse-distance interpolator over the surrounding 2x2 source samples.

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod angular;
pub mod composite;
pub mod decision;
pub mod error;
pub mod grid;
pub mod mapping;
pub mod raster;
pub mod regrid;
pub mod resample;
#[cfg(feature = "python")]
mod py;

pub use angular::AngularTransform;
pub use composite::{combine_rgb, combine_rgb_on_red};
pub use error::{RegridError, Result};
pub use grid::{Domain, RegularAxis, RegularGrid2D};
pub use raster::Raster;
pub use regrid::{resample, RegridEngine, RegridOptions};
pub use resample::ResampleMode;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _fgf_regrid(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
