//! Haversine great-circle distance on a spherical Earth.

use crate::error::ProjError;
use crate::point::GeoPoint;

/// Mean Earth radius used for radius filtering, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two geographic points, in kilometres.
///
/// Spherical approximation; good to kilometre-scale precision, which is all
/// radius filtering needs.
pub fn distance_km(p1: &GeoPoint, p2: &GeoPoint) -> Result<f64, ProjError> {
    for p in [p1, p2] {
        if !p.latitude.is_finite() || !p.longitude.is_finite() {
            return Err(ProjError::InvalidInput(format!(
                "distance endpoints must be finite, got ({}, {})",
                p.latitude, p.longitude
            )));
        }
    }

    let d_lat = (p2.latitude - p1.latitude).to_radians();
    let d_lon = (p2.longitude - p1.longitude).to_radians();
    let cos_lat = p1.latitude.to_radians().cos() * p2.latitude.to_radians().cos();
    let a = ((d_lat / 2.0).sin().powi(2) + cos_lat * (d_lon / 2.0).sin().powi(2)).clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    Ok(EARTH_RADIUS_KM * c)
}
