//! Catalog services
//!
//! This module defines the two catalog collaborators the star-field query
//! depends on, the records they produce, and TAP clients for the NASA
//! Exoplanet Archive and the Gaia archive.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::coordinates::{SkyCoord, SkyRegion};
use crate::{ExoskyError, Result};

mod exoplanet_archive;
mod gaia;
pub mod tap;

pub use exoplanet_archive::NasaExoplanetArchive;
pub use gaia::GaiaArchive;
pub use tap::{TapColumn, TapTable};

/// A planet and the sky position of its host star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostStarRecord {
    /// Planet name
    pub pl_name: String,
    /// Host star name
    pub hostname: String,
    /// Host star position (degrees)
    pub coord: SkyCoord,
    /// System H-band magnitude, if known
    pub sy_hmag: Option<f64>,
    /// System Ks-band magnitude, if known
    pub sy_kmag: Option<f64>,
}

/// A star returned by a regional astrometric query
///
/// Values are passed through as the service delivered them. Missing
/// positions or magnitudes arrive as NaN and must be screened before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CatalogStar {
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
    /// Apparent magnitude (Gaia G-band mean)
    pub magnitude: f64,
    /// Parallax (mas), if available
    pub parallax: Option<f64>,
}

impl CatalogStar {
    /// Creates a catalog star
    ///
    /// # Arguments
    ///
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    /// * `magnitude` - Apparent G-band magnitude
    /// * `parallax` - Parallax in milliarcseconds, if measured
    pub fn new(ra: f64, dec: f64, magnitude: f64, parallax: Option<f64>) -> Self {
        Self {
            ra,
            dec,
            magnitude,
            parallax,
        }
    }

    /// Sky position of the star
    pub fn position(&self) -> SkyCoord {
        SkyCoord::new(self.ra, self.dec)
    }

    /// Distance derived from parallax, see [`parallax_distance`]
    pub fn distance(&self) -> Option<f64> {
        parallax_distance(self.parallax)
    }

    /// True when position and magnitude can be projected
    pub fn is_projectable(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite() && self.magnitude.is_finite()
    }
}

/// `1 / parallax` for a present, strictly positive parallax
///
/// With parallax in milliarcseconds the result is in kiloparsecs.
pub fn parallax_distance(parallax: Option<f64>) -> Option<f64> {
    parallax
        .filter(|&p| p.is_finite() && p > 0.0)
        .map(|p| 1.0 / p)
}

/// Resolves target names to host-star records
pub trait ExoplanetArchive {
    /// All records matching `name`; an empty list when nothing matches
    fn resolve(&self, name: &str) -> Result<Vec<HostStarRecord>>;
}

/// Answers box-shaped regional star queries
pub trait AstrometricCatalog {
    /// At most `limit` stars inside `region`, in the service's default order
    fn stars_in_region(&self, region: &SkyRegion, limit: usize) -> Result<Vec<CatalogStar>>;
}

/// Create a blocking HTTP client with the given request timeout
pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("exosky/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ExoskyError::ServiceError(format!("Failed to create HTTP client: {}", e)))
}

/// Quote a string literal for ADQL
pub(crate) fn adql_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0.1), Some(10.0))]
    #[case(Some(2.0), Some(0.5))]
    #[case(Some(0.0), None)]
    #[case(Some(-1.3), None)]
    #[case(Some(f64::NAN), None)]
    #[case(None, None)]
    fn test_parallax_distance(#[case] parallax: Option<f64>, #[case] expected: Option<f64>) {
        match (parallax_distance(parallax), expected) {
            (Some(d), Some(e)) => approx::assert_relative_eq!(d, e, max_relative = 1e-12),
            (got, want) => assert_eq!(got, want),
        }
    }

    #[test]
    fn test_catalog_star_projectable() {
        assert!(CatalogStar::new(10.0, 20.0, 12.0, None).is_projectable());
        assert!(!CatalogStar::new(f64::NAN, 20.0, 12.0, None).is_projectable());
        assert!(!CatalogStar::new(10.0, 20.0, f64::NAN, Some(1.0)).is_projectable());
    }

    #[test]
    fn test_catalog_star_distance() {
        let star = CatalogStar::new(10.0, 20.0, 12.0, Some(0.1));
        approx::assert_relative_eq!(star.distance().unwrap(), 10.0, max_relative = 1e-12);
        assert_eq!(star.position(), SkyCoord::new(10.0, 20.0));
    }

    #[test]
    fn test_adql_quote() {
        assert_eq!(adql_quote("TRAPPIST-1 b"), "'TRAPPIST-1 b'");
        assert_eq!(adql_quote("Barnard's Star"), "'Barnard''s Star'");
    }
}
