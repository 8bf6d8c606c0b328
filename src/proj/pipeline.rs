//! Pipeline — registry CRS to WGS84, dispatching between the native
//! Lambert-93 converter and a proj4rs fallback.

use crate::error::ProjError;
use crate::point::{GeoPoint, ProjectedPoint};
use crate::proj::common::SolverConfig;
use crate::proj::crs::CrsTransform;
use crate::proj::lambert93::Lambert93;
use crate::proj::Projection;

pub const EPSG_LAMBERT93: u32 = 2154;
pub const EPSG_WGS84: u32 = 4326;
pub const EPSG_RGF93_GEOGRAPHIC: u32 = 4171;

/// A source-CRS-to-WGS84 transform for one EPSG code.
pub enum Pipeline {
    /// Lambert-93 through the native iterative solver.
    Native(Lambert93),
    /// Already geographic; x is longitude and y latitude, in degrees.
    Geographic,
    /// Fallback to proj4rs for everything else.
    Proj4rs(Box<CrsTransform>),
}

impl Pipeline {
    pub fn for_epsg(code: u32) -> Result<Self, ProjError> {
        Self::for_epsg_with_config(code, SolverConfig::default())
    }

    /// Like `for_epsg`, with solver settings for the native Lambert-93 path.
    pub fn for_epsg_with_config(code: u32, config: SolverConfig) -> Result<Self, ProjError> {
        let pipeline = match code {
            EPSG_LAMBERT93 => Pipeline::Native(Lambert93::with_config(config)),
            EPSG_WGS84 | EPSG_RGF93_GEOGRAPHIC => Pipeline::Geographic,
            _ => Pipeline::Proj4rs(Box::new(CrsTransform::to_wgs84(&format!("EPSG:{code}"))?)),
        };
        log::debug!("EPSG:{code} resolved to {} pipeline", pipeline.name());
        Ok(pipeline)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Pipeline::Native(_) => "native",
            Pipeline::Geographic => "geographic",
            Pipeline::Proj4rs(_) => "proj4rs",
        }
    }

    /// Transform one point in the source CRS to WGS84 degrees.
    pub fn to_geo(&self, point: &ProjectedPoint) -> Result<GeoPoint, ProjError> {
        point.validate()?;
        match self {
            Pipeline::Native(proj) => {
                let (lon, lat) = proj.inverse(point.x, point.y)?;
                GeoPoint::from_radians(lon, lat)
            }
            Pipeline::Geographic => GeoPoint::new(point.y, point.x),
            Pipeline::Proj4rs(ct) => {
                let (lon, lat) = ct.transform(point.x, point.y)?;
                GeoPoint::new(lat, lon)
            }
        }
    }

    /// Batch transform. Each point succeeds or fails on its own.
    pub fn to_geo_batch(&self, coords: &[(f64, f64)]) -> Vec<Result<GeoPoint, ProjError>> {
        coords
            .iter()
            .map(|&(x, y)| self.to_geo(&ProjectedPoint { x, y }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lambert93_is_native() {
        let pipe = Pipeline::for_epsg(2154).unwrap();
        assert!(matches!(pipe, Pipeline::Native(_)));
        let p = pipe.to_geo(&ProjectedPoint { x: 700_000.0, y: 6_600_000.0 }).unwrap();
        assert_relative_eq!(p.latitude, 46.5, epsilon = 1e-9);
        assert_relative_eq!(p.longitude, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_geographic_passthrough() {
        let pipe = Pipeline::for_epsg(4326).unwrap();
        let p = pipe.to_geo(&ProjectedPoint { x: 2.35, y: 48.86 }).unwrap();
        assert_eq!(p, GeoPoint::new(48.86, 2.35).unwrap());
        assert!(pipe.to_geo(&ProjectedPoint { x: 2.35, y: 148.86 }).is_err());
    }

    #[test]
    fn test_native_matches_proj4rs() {
        let native = Pipeline::for_epsg(2154).unwrap();
        let fallback = Pipeline::Proj4rs(Box::new(CrsTransform::to_wgs84("EPSG:2154").unwrap()));

        let test_points: &[(f64, f64)] = &[
            (652_709.401, 6_862_785.346),
            (892_390.222, 6_247_035.257),
            (146_632.979, 6_836_262.327),
            (1_050_362.695, 6_840_899.647),
        ];

        for &(x, y) in test_points {
            let point = ProjectedPoint { x, y };
            let n = native.to_geo(&point).unwrap();
            let p = fallback.to_geo(&point).unwrap();
            assert_relative_eq!(n.latitude, p.latitude, epsilon = 1e-6);
            assert_relative_eq!(n.longitude, p.longitude, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_overseas_falls_back_to_proj4rs() {
        let pipe = Pipeline::for_epsg(32740).unwrap();
        assert_eq!(pipe.name(), "proj4rs");
        let p = pipe.to_geo(&ProjectedPoint { x: 338_000.0, y: 7_690_000.0 }).unwrap();
        assert!(p.latitude < -20.5 && p.latitude > -21.5, "lat = {}", p.latitude);
    }

    #[test]
    fn test_unknown_code() {
        assert!(matches!(
            Pipeline::for_epsg(99_999),
            Err(ProjError::UnknownCrs(_))
        ));
    }

    #[test]
    fn test_batch_keeps_going_past_failures() {
        let pipe = Pipeline::for_epsg(2154).unwrap();
        let results = pipe.to_geo_batch(&[
            (700_000.0, 6_600_000.0),
            (f64::NAN, 6_600_000.0),
            (1e9, 1e9),
            (652_709.401, 6_862_785.346),
        ]);
        assert_eq!(results.len(), 4);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_err());
        assert!(results[3].is_ok());
    }

    #[test]
    fn test_solver_config_reaches_native_path() {
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        let pipe = Pipeline::for_epsg_with_config(2154, config).unwrap();
        let err = pipe
            .to_geo(&ProjectedPoint { x: 700_000.0, y: 6_600_000.0 })
            .unwrap_err();
        assert_eq!(err, ProjError::DidNotConverge { iterations: 1 });
    }
}
