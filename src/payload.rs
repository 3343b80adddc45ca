//! Star-field results and their wire form
//!
//! A [`ResponsePayload`] lists the resolved host stars and the projected
//! neighbouring stars for one query. It is turned into JSON through
//! [`Datum`] and [`normalize`], which takes care of missing values.

use serde_json::Value;

use crate::catalogs::{CatalogStar, HostStarRecord};
use crate::coordinates::{magnitude_scale_radius, project, Cartesian3};
use crate::normalize::{normalize, Datum};

/// A catalog star placed in the visualization frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStar {
    pub star: CatalogStar,
    /// Parallax-derived distance (`1 / parallax`), if derivable
    pub distance: Option<f64>,
    /// Magnitude-derived radius of the projection sphere
    pub scale_radius: f64,
    /// Projected position, in the same units as `scale_radius`
    pub position: Cartesian3,
}

impl ProjectedStar {
    /// Project a star into the visualization frame
    ///
    /// Returns `None` when the star has a non-finite position or magnitude,
    /// or when its magnitude is so faint that the scale radius overflows.
    pub fn from_star(star: CatalogStar) -> Option<Self> {
        if !star.is_projectable() {
            return None;
        }
        let scale_radius = magnitude_scale_radius(star.magnitude);
        let position = project(star.ra, star.dec, star.magnitude);
        if !scale_radius.is_finite() || !position.is_finite() {
            return None;
        }
        Some(Self {
            star,
            distance: star.distance(),
            scale_radius,
            position,
        })
    }

    pub fn to_datum(&self) -> Datum {
        Datum::map([
            ("ra", Datum::from(self.star.ra)),
            ("dec", Datum::from(self.star.dec)),
            ("magnitude", Datum::from(self.star.magnitude)),
            ("parallax", Datum::from(self.star.parallax)),
            ("distance", Datum::from(self.distance)),
            ("scale_radius", Datum::from(self.scale_radius)),
            ("x", Datum::from(self.position.x)),
            ("y", Datum::from(self.position.y)),
            ("z", Datum::from(self.position.z)),
        ])
    }
}

fn host_datum(host: &HostStarRecord) -> Datum {
    Datum::map([
        ("pl_name", Datum::from(host.pl_name.as_str())),
        ("hostname", Datum::from(host.hostname.as_str())),
        ("ra", Datum::from(host.coord.ra)),
        ("dec", Datum::from(host.coord.dec)),
        ("sy_hmag", Datum::from(host.sy_hmag)),
        ("sy_kmag", Datum::from(host.sy_kmag)),
    ])
}

/// Result of one star-field query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponsePayload {
    pub hosts: Vec<HostStarRecord>,
    pub stars: Vec<ProjectedStar>,
}

impl ResponsePayload {
    pub fn to_datum(&self) -> Datum {
        Datum::map([
            (
                "exoplanet_data",
                Datum::Seq(self.hosts.iter().map(host_datum).collect()),
            ),
            (
                "stars",
                Datum::Seq(self.stars.iter().map(ProjectedStar::to_datum).collect()),
            ),
        ])
    }

    /// Normalized JSON for the wire and for snapshots
    pub fn to_json(&self) -> Value {
        normalize(&self.to_datum())
    }
}
