//! NASA Exoplanet Archive client
//!
//! Names are resolved against the planetary systems (`ps`) table through the
//! archive's TAP service. A name matches a row when it equals either the
//! planet name or the host name, ignoring case. The `ps` table holds one row
//! per published solution, so a single planet often yields several records.

use std::time::Duration;

use log::{debug, warn};
use serde_json::Value;

use super::tap::TapTable;
use super::{adql_quote, http_client, ExoplanetArchive, HostStarRecord};
use crate::constants::{EXOPLANET_ARCHIVE_TAP_URL, PLANETARY_SYSTEMS_TABLE};
use crate::coordinates::SkyCoord;
use crate::{ExoskyError, Result};

/// TAP client for the NASA Exoplanet Archive
pub struct NasaExoplanetArchive {
    client: reqwest::blocking::Client,
    url: String,
}

impl NasaExoplanetArchive {
    /// Client for the public archive endpoint
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(EXOPLANET_ARCHIVE_TAP_URL, timeout)
    }

    /// Client for a specific TAP `sync` endpoint
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.to_string(),
        })
    }

    /// ADQL selecting the host records for `name`
    pub fn query_for(name: &str) -> String {
        let quoted = adql_quote(name.trim());
        format!(
            "SELECT pl_name, hostname, ra, dec, sy_hmag, sy_kmag FROM {} \
             WHERE UPPER(pl_name) = UPPER({q}) OR UPPER(hostname) = UPPER({q})",
            PLANETARY_SYSTEMS_TABLE,
            q = quoted
        )
    }
}

impl ExoplanetArchive for NasaExoplanetArchive {
    fn resolve(&self, name: &str) -> Result<Vec<HostStarRecord>> {
        let query = Self::query_for(name);
        debug!("Exoplanet archive query: {}", query);

        let response = self
            .client
            .get(&self.url)
            .query(&[("query", query.as_str()), ("format", "json")])
            .send()
            .map_err(|e| ExoskyError::ServiceError(format!("Exoplanet archive request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ExoskyError::ServiceError(format!(
                "Exoplanet archive returned status: {}",
                response.status()
            )));
        }

        let body: Value = response.json().map_err(|e| {
            ExoskyError::DataError(format!("Invalid exoplanet archive response: {}", e))
        })?;

        records_from_table(&TapTable::from_json(&body)?)
    }
}

/// Build host records from an archive result table
///
/// Rows without a usable position cannot be placed on the sky and are
/// dropped with a warning.
pub(crate) fn records_from_table(table: &TapTable) -> Result<Vec<HostStarRecord>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let pl_name = table.column("pl_name")?;
    let hostname = table.column("hostname")?;
    let ra = table.numeric("ra")?;
    let dec = table.numeric("dec")?;
    let hmag = table.numeric("sy_hmag").ok();
    let kmag = table.numeric("sy_kmag").ok();

    let mut records = Vec::with_capacity(table.len());
    for row in 0..table.len() {
        let name = pl_name.text_at(row).unwrap_or_default();
        let coord = match (ra.get(row), dec.get(row)) {
            (Some(ra), Some(dec)) if ra.is_finite() && dec.is_finite() => SkyCoord::new(ra, dec),
            _ => {
                warn!("Skipping archive row for {:?}: no sky position", name);
                continue;
            }
        };

        records.push(HostStarRecord {
            pl_name: name,
            hostname: hostname.text_at(row).unwrap_or_default(),
            coord,
            sy_hmag: hmag.and_then(|c| c.get(row)),
            sy_kmag: kmag.and_then(|c| c.get(row)),
        });
    }

    Ok(records)
}
