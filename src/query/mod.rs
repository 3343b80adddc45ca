//! Star-field query orchestration
//!
//! A query resolves a target name to host-star records, searches a box
//! around each host in the astrometric catalog, and projects every returned
//! star. Regions are queried one after another. A failing region or a
//! malformed star is logged and left out; only an unresolvable name is
//! reported to the caller, as [`Lookup::NotFound`].

use log::{debug, info, warn};

use crate::catalogs::{AstrometricCatalog, CatalogStar, ExoplanetArchive, HostStarRecord};
use crate::constants::{REGION_HALF_WIDTH_DEG, REGION_STAR_LIMIT};
use crate::coordinates::SkyRegion;
use crate::payload::{ProjectedStar, ResponsePayload};

/// Outcome of a star-field query
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found {
        payload: ResponsePayload,
        report: QueryReport,
    },
    /// The name resolved to no host records
    NotFound,
}

impl Lookup {
    /// The payload of a found lookup
    pub fn payload(&self) -> Option<&ResponsePayload> {
        match self {
            Lookup::Found { payload, .. } => Some(payload),
            Lookup::NotFound => None,
        }
    }
}

/// What happened while answering a query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryReport {
    /// Regional queries issued
    pub regions_queried: usize,
    /// Regional queries that failed and contributed nothing
    pub regions_failed: usize,
    /// Stars returned by the catalog across all regions
    pub stars_received: usize,
    /// Stars dropped because they could not be projected
    pub stars_skipped: usize,
}

/// Runs star-field queries against an exoplanet archive and a star catalog
pub struct StarFieldQuery {
    archive: Box<dyn ExoplanetArchive + Send + Sync>,
    catalog: Box<dyn AstrometricCatalog + Send + Sync>,
    half_width: f64,
    limit: usize,
}

impl StarFieldQuery {
    /// Query using the default half-degree box and 100-star cap per region
    pub fn new(
        archive: Box<dyn ExoplanetArchive + Send + Sync>,
        catalog: Box<dyn AstrometricCatalog + Send + Sync>,
    ) -> Self {
        Self {
            archive,
            catalog,
            half_width: REGION_HALF_WIDTH_DEG,
            limit: REGION_STAR_LIMIT,
        }
    }

    /// Half width of the box searched around each host, in degrees
    pub fn with_half_width(mut self, half_width: f64) -> Self {
        self.half_width = half_width;
        self
    }

    /// Maximum number of stars requested per region
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Host records for `name`, empty when the lookup fails
    pub fn resolve(&self, name: &str) -> Vec<HostStarRecord> {
        match self.archive.resolve(name) {
            Ok(records) => records,
            Err(e) => {
                warn!("Error fetching exoplanet data for {}: {}", name, e);
                Vec::new()
            }
        }
    }

    /// Resolve `name` and build the projected star field around its hosts
    pub fn run(&self, name: &str) -> Lookup {
        let hosts = self.resolve(name);
        if hosts.is_empty() {
            info!("No exoplanet data found for {}", name);
            return Lookup::NotFound;
        }

        let mut report = QueryReport::default();
        let mut stars: Vec<CatalogStar> = Vec::new();

        for host in &hosts {
            let region = SkyRegion::around(host.coord, self.half_width);
            debug!(
                "Querying region around {} (RA {:.6}, Dec {:.6})",
                host.pl_name, host.coord.ra, host.coord.dec
            );

            report.regions_queried += 1;
            match self.catalog.stars_in_region(&region, self.limit) {
                Ok(found) => {
                    report.stars_received += found.len();
                    stars.extend(found);
                }
                Err(e) => {
                    report.regions_failed += 1;
                    warn!("Error fetching catalog stars for {}: {}", host.pl_name, e);
                }
            }
        }

        let projected: Vec<ProjectedStar> = stars
            .into_iter()
            .filter_map(|star| {
                let projected = ProjectedStar::from_star(star);
                if projected.is_none() {
                    report.stars_skipped += 1;
                    debug!("Skipping star that cannot be projected: {:?}", star);
                }
                projected
            })
            .collect();

        if report.stars_skipped > 0 {
            warn!(
                "Skipped {} of {} stars for {}",
                report.stars_skipped, report.stars_received, name
            );
        }
        info!(
            "Found {} host records and {} stars for {}",
            hosts.len(),
            projected.len(),
            name
        );

        Lookup::Found {
            payload: ResponsePayload {
                hosts,
                stars: projected,
            },
            report,
        }
    }
}
