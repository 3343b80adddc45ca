//! # Cartesian positions
//!
//! Positions handed to the visualization are plain right-handed Cartesian
//! triples in the equatorial frame:
//!
//! - **X-axis**: toward the vernal equinox (RA = 0°, Dec = 0°)
//! - **Y-axis**: toward RA = 90°, Dec = 0°
//! - **Z-axis**: toward the north celestial pole (Dec = +90°)
//!
//! The length unit depends on the producer. Positions from
//! [`project`](super::project) are in magnitude-scale units, not parsecs.
//!
//! ```rust
//! use exosky::coordinates::Cartesian3;
//! use std::f64::consts::PI;
//!
//! let north_pole = Cartesian3::from_spherical(0.0, PI / 2.0, 2.0);
//! assert!(north_pole.x.abs() < 1e-15);
//! assert!((north_pole.z - 2.0).abs() < 1e-15);
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Three-dimensional Cartesian position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component (toward vernal equinox)
    pub x: f64,
    /// Y-component (toward RA = 90°)
    pub y: f64,
    /// Z-component (toward north celestial pole)
    pub z: f64,
}

impl Cartesian3 {
    /// Creates a new Cartesian position
    ///
    /// # Arguments
    ///
    /// * `x` - X-component (toward vernal equinox)
    /// * `y` - Y-component (toward RA = 90°)
    /// * `z` - Z-component (toward north celestial pole)
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Creates a position from spherical coordinates
    ///
    /// # Arguments
    ///
    /// * `ra` - Right ascension in radians
    /// * `dec` - Declination in radians
    /// * `distance` - Radius of the sphere the point lies on
    ///
    /// - `x = distance * cos(dec) * cos(ra)`
    /// - `y = distance * cos(dec) * sin(ra)`
    /// - `z = distance * sin(dec)`
    pub fn from_spherical(ra: f64, dec: f64, distance: f64) -> Self {
        let cos_dec = dec.cos();
        Cartesian3 {
            x: distance * cos_dec * ra.cos(),
            y: distance * cos_dec * ra.sin(),
            z: distance * dec.sin(),
        }
    }

    /// Euclidean distance from the origin
    ///
    /// Named `norm` rather than `magnitude` to keep it apart from stellar
    /// magnitudes, which this crate also deals in.
    pub fn norm(&self) -> f64 {
        self.to_vector3().norm()
    }

    /// Check that every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to nalgebra Vector3
    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Cartesian3> for (f64, f64, f64) {
    fn from(c: Cartesian3) -> Self {
        (c.x, c.y, c.z)
    }
}
