//! PyO3 binding for the radius search used by the prospecting API.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::point::GeoPoint;
use crate::search::{self, SearchArea};

/// Filter establishments by distance from a search centre.
///
/// Args:
///     records_json: JSON array of {siret, name?, naf?, x, y, epsg?} objects.
///     latitude: Search centre latitude (degrees).
///     longitude: Search centre longitude (degrees).
///     radius_km: Search radius in kilometres.
///     naf_prefix: Optional NAF code prefix, e.g. "62.01".
///
/// Returns:
///     JSON string {"matches": [...], "skipped": [...]}, matches nearest first.
#[pyfunction]
#[pyo3(signature = (records_json, latitude, longitude, radius_km, naf_prefix=None))]
pub fn search_radius(
    py: Python<'_>,
    records_json: &str,
    latitude: f64,
    longitude: f64,
    radius_km: f64,
    naf_prefix: Option<String>,
) -> PyResult<String> {
    let center =
        GeoPoint::new(latitude, longitude).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let area = SearchArea {
        center,
        radius_km,
        naf_prefix,
    };

    // Copy to owned before releasing the GIL
    let records_json = records_json.to_string();

    py.allow_threads(move || search::search_json(&records_json, &area))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}
