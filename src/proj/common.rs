//! Common helpers for conformal projection math (isometric latitude and its inverse).

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::error::ProjError;

/// Tuning for the iterative inverse-latitude solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverConfig {
    /// Absolute convergence tolerance on latitude, in radians.
    /// 1e-11 rad is well under a millimetre on the ground.
    pub tolerance: f64,
    /// Iteration cap; inputs that have not converged by then are rejected.
    pub max_iterations: usize,
    /// Reject projected points outside the projection's domain envelope.
    ///
    /// With this off, only non-finite and above-apex points are rejected. The
    /// solver still converges for absurd inputs far outside France, e.g.
    /// (-1e15, -1e15) comes back as a finite latitude near -90°, so a finite
    /// result no longer means a meaningful one.
    pub enforce_domain: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-11,
            max_iterations: 100,
            enforce_domain: true,
        }
    }
}

/// Isometric latitude of geodetic latitude `phi` on an ellipsoid of eccentricity `e`.
///
/// L = ln( tan(π/4 + φ/2) · ((1 − e·sinφ)/(1 + e·sinφ))^(e/2) )
pub fn isometric_latitude(phi: f64, e: f64) -> f64 {
    let esin = e * phi.sin();
    ((FRAC_PI_4 + phi / 2.0).tan() * ((1.0 - esin) / (1.0 + esin)).powf(e / 2.0)).ln()
}

/// Recover geodetic latitude from isometric latitude by fixed-point iteration.
///
/// Starts from the spherical guess φ₀ = 2·atan(exp(L)) − π/2 and repeats
/// φ ← 2·atan(((1 + e·sinφ)/(1 − e·sinφ))^(e/2) · exp(L)) − π/2
/// until the step is within `config.tolerance`.
pub fn latitude_from_isometric(
    latiso: f64,
    e: f64,
    config: &SolverConfig,
) -> Result<f64, ProjError> {
    if !latiso.is_finite() {
        return Err(ProjError::InvalidInput(format!(
            "isometric latitude is not finite: {latiso}"
        )));
    }

    let exp_l = latiso.exp();
    let mut phi = 2.0 * exp_l.atan() - FRAC_PI_2;

    for iteration in 1..=config.max_iterations {
        let esin = e * phi.sin();
        let next = 2.0 * (((1.0 + esin) / (1.0 - esin)).powf(e / 2.0) * exp_l).atan() - FRAC_PI_2;
        let delta = next - phi;
        phi = next;

        // Only reachable with e >= 1, where the ratio can go negative
        if delta.is_nan() {
            return Err(ProjError::DidNotConverge {
                iterations: iteration,
            });
        }
        if delta.abs() <= config.tolerance {
            log::trace!("latitude solver converged in {iteration} iterations");
            return Ok(phi);
        }
    }

    Err(ProjError::DidNotConverge {
        iterations: config.max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::GRS80;
    use approx::assert_relative_eq;

    #[test]
    fn test_isometric_latitude_equator() {
        let l = isometric_latitude(0.0, GRS80.eccentricity());
        assert_relative_eq!(l, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_isometric_latitude_ign_reference() {
        // IGN ALG0001 test set (Clarke 1880 eccentricity)
        let e = 0.081_991_889_98;
        let cases: &[(f64, f64)] = &[
            (0.872_664_626, 1.005_526_536_49),
            (-0.3, -0.302_616_900_63),
            (0.199_989_033_70, 0.2),
        ];
        for &(phi, expected) in cases {
            assert_relative_eq!(isometric_latitude(phi, e), expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_latitude_roundtrip() {
        let e = GRS80.eccentricity();
        let config = SolverConfig::default();
        for lat_deg in [-60.0, -10.0, 0.0, 41.3, 46.5, 51.1, 80.0] {
            let phi = f64::to_radians(lat_deg);
            let l = isometric_latitude(phi, e);
            let back = latitude_from_isometric(l, e, &config).unwrap();
            assert_relative_eq!(back, phi, epsilon = 1e-11);
        }
    }

    #[test]
    fn test_spherical_case_needs_one_step() {
        // With e = 0 the initial guess is already exact.
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        let phi = latitude_from_isometric(0.5, 0.0, &config).unwrap();
        assert_relative_eq!(phi, 2.0 * 0.5_f64.exp().atan() - FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn test_iteration_cap() {
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        let err = latitude_from_isometric(0.9, GRS80.eccentricity(), &config).unwrap_err();
        assert_eq!(err, ProjError::DidNotConverge { iterations: 1 });
    }

    #[test]
    fn test_nan_step_reports_iterations_run() {
        let config = SolverConfig::default();
        let err = latitude_from_isometric(1.0, 1.5, &config).unwrap_err();
        assert_eq!(err, ProjError::DidNotConverge { iterations: 1 });
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = SolverConfig::default();
        assert!(matches!(
            latitude_from_isometric(f64::NAN, GRS80.eccentricity(), &config),
            Err(ProjError::InvalidInput(_))
        ));
    }
}
