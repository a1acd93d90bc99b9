use pyo3::prelude::*;

mod composite;
mod regrid;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(regrid::regrid_array, m)?)?;
    m.add_function(wrap_pyfunction!(regrid::sanitize, m)?)?;
    m.add_function(wrap_pyfunction!(composite::combine_rgb, m)?)?;
    Ok(())
}
