//! Planar and geographic point types.

use serde::{Deserialize, Serialize};

use crate::error::ProjError;

/// A point in a projected CRS, in metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// Easting
    pub x: f64,
    /// Northing
    pub y: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, y: f64) -> Result<Self, ProjError> {
        let point = Self { x, y };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<(), ProjError> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ProjError::InvalidInput(format!(
                "projected coordinates must be finite, got ({}, {})",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

/// A geographic point in decimal degrees (WGS84 / RGF93).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ProjError> {
        let point = Self {
            latitude,
            longitude,
        };
        point.validate()?;
        Ok(point)
    }

    /// Build from radians, as returned by `Projection::inverse` (lon, lat order).
    pub fn from_radians(lon: f64, lat: f64) -> Result<Self, ProjError> {
        Self::new(lat.to_degrees(), lon.to_degrees())
    }

    pub fn validate(&self) -> Result<(), ProjError> {
        let (lat, lon) = (self.latitude, self.longitude);
        if !lat.is_finite() || !lon.is_finite() {
            return Err(ProjError::InvalidInput(format!(
                "geographic coordinates must be finite, got ({lat}, {lon})"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ProjError::InvalidInput(format!(
                "latitude out of range: {lat}"
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ProjError::InvalidInput(format!(
                "longitude out of range: {lon}"
            )));
        }
        Ok(())
    }

    /// Great-circle distance to `other`, in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> Result<f64, ProjError> {
        crate::geodesic::distance_km(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projected_rejects_nan() {
        assert!(ProjectedPoint::new(f64::NAN, 6_600_000.0).is_err());
        assert!(ProjectedPoint::new(700_000.0, f64::INFINITY).is_err());
        assert!(ProjectedPoint::new(700_000.0, 6_600_000.0).is_ok());
    }

    #[test]
    fn test_geo_ranges() {
        assert!(GeoPoint::new(48.86, 2.35).is_ok());
        assert!(GeoPoint::new(90.0, -180.0).is_ok());
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_from_radians_order() {
        let p = GeoPoint::from_radians(3.0_f64.to_radians(), 46.5_f64.to_radians()).unwrap();
        assert!((p.latitude - 46.5).abs() < 1e-12);
        assert!((p.longitude - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_json_shape() {
        let p: GeoPoint = serde_json::from_str(r#"{"latitude": 43.3, "longitude": 5.37}"#).unwrap();
        assert_eq!(p, GeoPoint::new(43.3, 5.37).unwrap());
    }
}
