use crate::error::ProjError;
use proj4rs::Proj;

/// Thin wrapper around proj4rs for registry CRSes without a native implementation.
///
/// Always targets geographic WGS84. proj4rs works in radians for geographic
/// CRSes; this wrapper takes and returns CRS native units (metres for the
/// projected source, degrees for the output).
pub struct CrsTransform {
    src: Proj,
    dst: Proj,
    src_is_geo: bool,
}

impl CrsTransform {
    /// Create a transform from `src_crs` to EPSG:4326.
    ///
    /// Accepts EPSG codes ("EPSG:2975") or PROJ strings ("+proj=utm +zone=40 +south ...").
    pub fn to_wgs84(src_crs: &str) -> Result<Self, ProjError> {
        let src = Proj::from_user_string(src_crs)
            .map_err(|e| ProjError::UnknownCrs(format!("{src_crs}: {e}")))?;
        let dst = Proj::from_user_string("EPSG:4326")
            .map_err(|e| ProjError::UnknownCrs(format!("EPSG:4326: {e}")))?;
        let src_is_geo = src.is_latlong();
        Ok(Self {
            src,
            dst,
            src_is_geo,
        })
    }

    /// Transform a single point to (lon_deg, lat_deg).
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        let mut point = if self.src_is_geo {
            (x.to_radians(), y.to_radians())
        } else {
            (x, y)
        };

        proj4rs::transform::transform(&self.src, &self.dst, &mut point)
            .map_err(|e| ProjError::TransformFailed(e.to_string()))?;

        Ok((point.0.to_degrees(), point.1.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_utm40s_reunion() {
        // Saint-Denis, La Réunion: ~55.45°E, ~20.88°S
        let ct = CrsTransform::to_wgs84("EPSG:32740").unwrap();
        let (lon, lat) = ct.transform(338_000.0, 7_690_000.0).unwrap();
        assert!(lon > 55.0 && lon < 56.0, "lon out of range: {lon}");
        assert!(lat > -21.5 && lat < -20.5, "lat out of range: {lat}");
    }

    #[test]
    fn test_lambert93_definition() {
        // Projection origin of EPSG:2154
        let ct = CrsTransform::to_wgs84("EPSG:2154").unwrap();
        let (lon, lat) = ct.transform(700_000.0, 6_600_000.0).unwrap();
        assert_relative_eq!(lon, 3.0, epsilon = 1e-6);
        assert_relative_eq!(lat, 46.5, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_crs() {
        assert!(CrsTransform::to_wgs84("EPSG:99999").is_err());
    }
}
