/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening (dimensionless)
    pub f: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, f: f64) -> Self {
        Self { a, f }
    }

    /// First eccentricity, sqrt(2f - f^2).
    pub fn eccentricity(&self) -> f64 {
        (2.0 * self.f - self.f * self.f).sqrt()
    }
}

/// GRS80, the ellipsoid Lambert-93 and RGF93 are defined on.
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);
