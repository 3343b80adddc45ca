//! Sky coordinates, search regions and the magnitude-scaled projection

pub mod cartesian;
mod projection;

pub use cartesian::Cartesian3;
pub use projection::{magnitude_scale_radius, project};

use crate::constants::{DEG2RAD, REGION_HALF_WIDTH_DEG};
use serde::{Deserialize, Serialize};

/// Equatorial sky position with both angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyCoord {
    /// Right ascension in degrees
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl SkyCoord {
    /// Creates a sky position
    ///
    /// # Arguments
    ///
    /// * `ra` - Right ascension in degrees
    /// * `dec` - Declination in degrees
    ///
    /// # Examples
    ///
    /// ```rust
    /// use exosky::SkyCoord;
    ///
    /// let trappist = SkyCoord::new(346.6223687, -5.0413983);
    /// assert!(trappist.is_finite());
    /// ```
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Right ascension in radians
    pub fn ra_radians(&self) -> f64 {
        self.ra * DEG2RAD
    }

    /// Declination in radians
    pub fn dec_radians(&self) -> f64 {
        self.dec * DEG2RAD
    }

    pub fn is_finite(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
    }
}

/// Rectangular RA/Dec box used for regional catalog queries
///
/// Bounds are inclusive and are not wrapped at RA 0/360 or clamped at the
/// poles; the catalog service receives them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkyRegion {
    pub ra_min: f64,
    pub ra_max: f64,
    pub dec_min: f64,
    pub dec_max: f64,
}

impl SkyRegion {
    /// Box of `half_width` degrees on each side of `center`
    pub fn around(center: SkyCoord, half_width: f64) -> Self {
        Self {
            ra_min: center.ra - half_width,
            ra_max: center.ra + half_width,
            dec_min: center.dec - half_width,
            dec_max: center.dec + half_width,
        }
    }

    /// Box with the default half-degree margin
    pub fn around_host(center: SkyCoord) -> Self {
        Self::around(center, REGION_HALF_WIDTH_DEG)
    }

    /// True when `coord` lies inside the box, edges included
    pub fn contains(&self, coord: SkyCoord) -> bool {
        (self.ra_min..=self.ra_max).contains(&coord.ra)
            && (self.dec_min..=self.dec_max).contains(&coord.dec)
    }

    /// Center of the box
    #[cfg(test)]
    pub(crate) fn center(&self) -> SkyCoord {
        SkyCoord::new(
            (self.ra_min + self.ra_max) / 2.0,
            (self.dec_min + self.dec_max) / 2.0,
        )
    }
}
