//! Magnitude-scaled projection of catalog stars into 3D
//!
//! Each star is placed on a sphere whose radius grows with apparent
//! magnitude, so fainter stars sit further out. The radius is a display
//! scale only; physical distances come from parallax elsewhere.

use super::{Cartesian3, SkyCoord};
use crate::constants::{MAGNITUDES_PER_DECADE, MAGNITUDE_OFFSET};

/// Visualization radius for an apparent magnitude: `10^((m + 5) / 5)`
pub fn magnitude_scale_radius(magnitude: f64) -> f64 {
    10f64.powf((magnitude + MAGNITUDE_OFFSET) / MAGNITUDES_PER_DECADE)
}

/// Project RA/Dec (degrees) and apparent magnitude to a Cartesian position
///
/// Pure and total on finite input. Callers must reject non-finite values
/// before calling; the result is unspecified for them.
pub fn project(ra_deg: f64, dec_deg: f64, magnitude: f64) -> Cartesian3 {
    let coord = SkyCoord::new(ra_deg, dec_deg);
    Cartesian3::from_spherical(
        coord.ra_radians(),
        coord.dec_radians(),
        magnitude_scale_radius(magnitude),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_project_ra_180() {
        let p = project(180.0, 0.0, 10.0);
        assert_relative_eq!(p.x, -1000.0, max_relative = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_project_pole() {
        // Magnitude 0 gives a radius of 10
        let p = project(42.0, 90.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 10.0, max_relative = 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.0, -1.46)]
    #[case(101.2874, -16.7161, 4.2)]
    #[case(279.2, 38.78, 0.03)]
    #[case(359.9, -89.5, 17.8)]
    #[case(12.5, 45.0, 21.0)]
    fn test_norm_matches_scale_radius(#[case] ra: f64, #[case] dec: f64, #[case] mag: f64) {
        let p = project(ra, dec, mag);
        assert_relative_eq!(p.norm(), magnitude_scale_radius(mag), max_relative = 1e-12);
    }

    #[test]
    fn test_scale_radius_is_increasing() {
        let mut previous = magnitude_scale_radius(-2.0);
        for step in 1..100 {
            let r = magnitude_scale_radius(-2.0 + step as f64 * 0.25);
            assert!(r > previous);
            previous = r;
        }
        assert_relative_eq!(magnitude_scale_radius(-5.0), 1.0);
        assert_relative_eq!(magnitude_scale_radius(5.0), 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_projection_is_deterministic() {
        assert_eq!(project(33.3, -12.0, 8.5), project(33.3, -12.0, 8.5));
    }
}
