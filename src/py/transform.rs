//! PyO3 bindings for Lambert-93 conversion and haversine distance.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::geodesic;
use crate::point::{GeoPoint, ProjectedPoint};
use crate::proj::lambert93::Lambert93;

/// Convert one Lambert-93 point to WGS84.
///
/// Returns:
///     Tuple of (latitude, longitude) in decimal degrees.
#[pyfunction]
pub fn lambert93_to_wgs84(x: f64, y: f64) -> PyResult<(f64, f64)> {
    let p = Lambert93::new()
        .unproject(&ProjectedPoint { x, y })
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((p.latitude, p.longitude))
}

/// Convert arrays of Lambert-93 coordinates to WGS84.
///
/// Args:
///     x: 1D array of eastings (metres).
///     y: 1D array of northings (metres).
///
/// Returns:
///     Tuple of (latitude, longitude) arrays. Points that cannot be
///     converted come back as NaN.
#[pyfunction]
#[allow(clippy::type_complexity)]
pub fn lambert93_to_wgs84_batch<'py>(
    py: Python<'py>,
    x: PyReadonlyArray1<'py, f64>,
    y: PyReadonlyArray1<'py, f64>,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let x_view = x.as_array();
    let y_view = y.as_array();

    let n = x_view.len();
    let y_len = y_view.len();
    if n != y_len {
        return Err(PyValueError::new_err(format!(
            "x and y must have same length, got {} and {}",
            n, y_len
        )));
    }

    let coords: Vec<(f64, f64)> = x_view
        .iter()
        .zip(y_view.iter())
        .map(|(&xi, &yi)| (xi, yi))
        .collect();

    let (lats, lons): (Vec<f64>, Vec<f64>) = py.allow_threads(move || {
        let proj = Lambert93::new();
        coords
            .iter()
            .map(|&(x, y)| match proj.unproject(&ProjectedPoint { x, y }) {
                Ok(p) => (p.latitude, p.longitude),
                Err(_) => (f64::NAN, f64::NAN),
            })
            .unzip()
    });

    Ok((
        PyArray1::from_owned_array(py, ndarray::Array1::from(lats)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(lons)),
    ))
}

/// Project a WGS84 point to Lambert-93.
///
/// Returns:
///     Tuple of (x, y) in metres.
#[pyfunction]
pub fn wgs84_to_lambert93(latitude: f64, longitude: f64) -> PyResult<(f64, f64)> {
    let p = GeoPoint::new(latitude, longitude)
        .and_then(|geo| Lambert93::new().project(&geo))
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((p.x, p.y))
}

/// Haversine distance in kilometres between two (latitude, longitude) points.
#[pyfunction]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> PyResult<f64> {
    let a = GeoPoint::new(lat1, lon1).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let b = GeoPoint::new(lat2, lon2).map_err(|e| PyValueError::new_err(e.to_string()))?;
    geodesic::distance_km(&a, &b).map_err(|e| PyValueError::new_err(e.to_string()))
}
