//! Lambert-93 (EPSG:2154), the official conic conformal projection of mainland France.
//!
//! Uses the IGN constants directly rather than deriving the cone from its
//! standard parallels:
//!   forward: L = isometric latitude, R = C·exp(−n·L), γ = n·(λ − λ₀),
//!            x = xs + R·sinγ, y = ys − R·cosγ
//!   inverse: R = hypot(x − xs, y − ys), γ = atan((x − xs)/(ys − y)),
//!            L = ln(C/R)/n, φ from L by fixed-point iteration, λ = λ₀ + γ/n

use crate::error::ProjError;
use crate::point::{GeoPoint, ProjectedPoint};
use crate::proj::common::{isometric_latitude, latitude_from_isometric, SolverConfig};
use crate::proj::ellipsoid::{Ellipsoid, GRS80};
use crate::proj::Projection;

/// Cone exponent n.
pub const N: f64 = 0.725_607_765_053_267_0;
/// Projection constant C (metres).
pub const C: f64 = 11_754_255.426_096;
/// False easting of the cone apex (metres).
pub const XS: f64 = 700_000.0;
/// False northing of the cone apex (metres).
pub const YS: f64 = 12_655_612.049_876;
/// Central meridian, 3°E, in radians.
pub const LON_MERIDIAN: f64 = 3.0 * std::f64::consts::PI / 180.0;

/// Projected bounds accepted by the inverse: the EPSG:2154 area of use,
/// rounded outwards. Every point in here lies south of the apex (y < YS).
pub const DOMAIN_X: (f64, f64) = (-400_000.0, 1_400_000.0);
pub const DOMAIN_Y: (f64, f64) = (5_900_000.0, 7_300_000.0);

#[derive(Clone, Copy, Debug)]
pub struct Lambert93 {
    ellipsoid: Ellipsoid,
    config: SolverConfig,
}

impl Lambert93 {
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            ellipsoid: GRS80,
            config,
        }
    }

    fn check_domain(&self, x: f64, y: f64) -> Result<(), ProjError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::InvalidInput(format!(
                "Lambert-93 coordinates must be finite, got ({x}, {y})"
            )));
        }
        // atan((x - xs) / (ys - y)) picks the wrong branch at or above the apex
        if y >= YS {
            return Err(ProjError::InvalidInput(format!(
                "northing {y} is at or above the projection apex"
            )));
        }
        if self.config.enforce_domain {
            let in_x = (DOMAIN_X.0..=DOMAIN_X.1).contains(&x);
            let in_y = (DOMAIN_Y.0..=DOMAIN_Y.1).contains(&y);
            if !in_x || !in_y {
                return Err(ProjError::InvalidInput(format!(
                    "({x}, {y}) is outside the Lambert-93 domain"
                )));
            }
        }
        Ok(())
    }

    /// Convert a Lambert-93 point to WGS84 degrees.
    pub fn unproject(&self, point: &ProjectedPoint) -> Result<GeoPoint, ProjError> {
        let (lon, lat) = self.inverse(point.x, point.y)?;
        GeoPoint::from_radians(lon, lat)
    }

    /// Convert WGS84 degrees to a Lambert-93 point.
    pub fn project(&self, point: &GeoPoint) -> Result<ProjectedPoint, ProjError> {
        point.validate()?;
        let (x, y) = self.forward(point.longitude.to_radians(), point.latitude.to_radians())?;
        ProjectedPoint::new(x, y)
    }
}

impl Default for Lambert93 {
    fn default() -> Self {
        Self::new()
    }
}

impl Projection for Lambert93 {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let latiso = isometric_latitude(lat, self.ellipsoid().eccentricity());
        let r = C * (-N * latiso).exp();
        let gamma = N * (lon - LON_MERIDIAN);

        let x = XS + r * gamma.sin();
        let y = YS - r * gamma.cos();
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjError::InvalidInput(format!(
                "cannot project ({}, {}) to Lambert-93",
                lon.to_degrees(),
                lat.to_degrees()
            )));
        }
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), ProjError> {
        self.check_domain(x, y)?;

        let dx = x - XS;
        let dy = y - YS;
        let r = (dx * dx + dy * dy).sqrt();
        let gamma = (dx / (YS - y)).atan();

        let latiso = (C / r).ln() / N;
        let e = self.ellipsoid().eccentricity();
        let lat = latitude_from_isometric(latiso, e, &self.config)?;
        let lon = LON_MERIDIAN + gamma / N;

        Ok((lon, lat))
    }

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }
}

/// Convert a Lambert-93 point to WGS84 with the default solver settings.
pub fn lambert93_to_wgs84(point: ProjectedPoint) -> Result<GeoPoint, ProjError> {
    Lambert93::new().unproject(&point)
}

/// Project a WGS84 point to Lambert-93.
pub fn wgs84_to_lambert93(point: GeoPoint) -> Result<ProjectedPoint, ProjError> {
    Lambert93::new().project(&point)
}
