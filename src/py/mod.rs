use pyo3::prelude::*;

mod search;
mod transform;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(transform::lambert93_to_wgs84, m)?)?;
    m.add_function(wrap_pyfunction!(transform::lambert93_to_wgs84_batch, m)?)?;
    m.add_function(wrap_pyfunction!(transform::wgs84_to_lambert93, m)?)?;
    m.add_function(wrap_pyfunction!(transform::distance_km, m)?)?;
    m.add_function(wrap_pyfunction!(search::search_radius, m)?)?;
    Ok(())
}
