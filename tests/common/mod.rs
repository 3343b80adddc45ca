//! Fake collaborators shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use exosky::chat::CompletionService;
use exosky::coordinates::SkyCoord;
use exosky::data::SnapshotStore;
use exosky::server::AppState;
use exosky::{
    AstrometricCatalog, CatalogStar, ExoplanetArchive, ExoskyError, HostStarRecord, SkyRegion,
    StarFieldQuery,
};

pub fn host(pl_name: &str, hostname: &str, ra: f64, dec: f64) -> HostStarRecord {
    HostStarRecord {
        pl_name: pl_name.to_string(),
        hostname: hostname.to_string(),
        coord: SkyCoord::new(ra, dec),
        sy_hmag: Some(7.5),
        sy_kmag: None,
    }
}

/// Archive answering every name from a fixed list, matched case-insensitively
pub struct StaticArchive {
    pub records: Vec<HostStarRecord>,
}

impl ExoplanetArchive for StaticArchive {
    fn resolve(&self, name: &str) -> exosky::Result<Vec<HostStarRecord>> {
        let wanted = name.to_uppercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.pl_name.to_uppercase() == wanted || r.hostname.to_uppercase() == wanted)
            .cloned()
            .collect())
    }
}

/// Catalog returning canned stars for regions containing a given point
///
/// Regions containing a point listed in `failing` produce a service error.
#[derive(Default)]
pub struct ScriptedCatalog {
    pub fields: Vec<(SkyCoord, Vec<CatalogStar>)>,
    pub failing: Vec<SkyCoord>,
    pub calls: Arc<Mutex<Vec<(SkyRegion, usize)>>>,
}

impl AstrometricCatalog for ScriptedCatalog {
    fn stars_in_region(
        &self,
        region: &SkyRegion,
        limit: usize,
    ) -> exosky::Result<Vec<CatalogStar>> {
        self.calls.lock().unwrap().push((*region, limit));
        if self.failing.iter().any(|c| region.contains(*c)) {
            return Err(ExoskyError::ServiceError("TAP service unavailable".into()));
        }
        Ok(self
            .fields
            .iter()
            .filter(|(center, _)| region.contains(*center))
            .flat_map(|(_, stars)| stars.iter().copied().take(limit))
            .collect())
    }
}

/// Chat service echoing the prompt, or failing when `fail` is set
pub struct EchoChat {
    pub fail: bool,
}

impl CompletionService for EchoChat {
    fn complete(&self, prompt: &str) -> exosky::Result<String> {
        if self.fail {
            Err(ExoskyError::ServiceError("upstream returned 500".into()))
        } else {
            Ok(format!("echo: {}", prompt))
        }
    }
}

/// Two hosts with three stars each, one of which lacks a magnitude
pub fn two_host_query() -> StarFieldQuery {
    let archive = StaticArchive {
        records: vec![
            host("Kepler-47 b", "Kepler-47", 291.03, 46.98),
            host("Kepler-47 c", "Kepler-47", 291.03, 46.98),
            host("51 Peg b", "51 Peg", 344.37, 20.77),
        ],
    };
    let catalog = ScriptedCatalog {
        fields: vec![(
            SkyCoord::new(291.03, 46.98),
            vec![
                CatalogStar::new(291.1, 47.0, 14.2, Some(0.8)),
                CatalogStar::new(290.9, 46.9, 16.0, None),
                CatalogStar::new(291.0, 47.1, f64::NAN, Some(1.2)),
            ],
        )],
        ..Default::default()
    };
    StarFieldQuery::new(Box::new(archive), Box::new(catalog))
}

pub fn app_state(snapshots: Option<SnapshotStore>, chat_fails: bool) -> AppState {
    AppState {
        query: two_host_query(),
        chat: Box::new(EchoChat { fail: chat_fails }),
        snapshots,
    }
}
