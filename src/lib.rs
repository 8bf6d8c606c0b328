pub mod error;
pub mod geodesic;
pub mod point;
pub mod proj;
pub mod search;
#[cfg(feature = "python")]
mod py;

pub use error::{ProjError, SearchError};
pub use geodesic::distance_km;
pub use point::{GeoPoint, ProjectedPoint};
pub use proj::lambert93::{lambert93_to_wgs84, wgs84_to_lambert93, Lambert93};
pub use search::{search, Establishment, SearchArea, SearchOutcome};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
