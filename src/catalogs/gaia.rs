//! Gaia archive client
//!
//! Regional queries go to the Gaia TAP service as synchronous ADQL jobs
//! against `gaiadr3.gaia_source`, returning position, G-band mean magnitude
//! and parallax for at most `limit` sources inside a RA/Dec box.

use std::time::Duration;

use log::debug;
use serde_json::Value;

use super::tap::TapTable;
use super::{http_client, AstrometricCatalog, CatalogStar};
use crate::constants::{GAIA_SOURCE_TABLE, GAIA_TAP_URL};
use crate::coordinates::SkyRegion;
use crate::{ExoskyError, Result};

/// TAP client for the Gaia archive
pub struct GaiaArchive {
    client: reqwest::blocking::Client,
    url: String,
}

impl GaiaArchive {
    /// Client for the public ESA endpoint
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(GAIA_TAP_URL, timeout)
    }

    /// Client for a specific TAP `sync` endpoint
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.to_string(),
        })
    }

    /// ADQL for a box query capped at `limit` rows
    pub fn query_for(region: &SkyRegion, limit: usize) -> String {
        format!(
            "SELECT TOP {} ra, dec, phot_g_mean_mag, parallax FROM {} \
             WHERE ra BETWEEN {} AND {} AND dec BETWEEN {} AND {}",
            limit,
            GAIA_SOURCE_TABLE,
            region.ra_min,
            region.ra_max,
            region.dec_min,
            region.dec_max
        )
    }
}

impl AstrometricCatalog for GaiaArchive {
    fn stars_in_region(&self, region: &SkyRegion, limit: usize) -> Result<Vec<CatalogStar>> {
        let query = Self::query_for(region, limit);
        debug!("Gaia query: {}", query);

        let response = self
            .client
            .post(&self.url)
            .form(&[
                ("REQUEST", "doQuery"),
                ("LANG", "ADQL"),
                ("FORMAT", "json"),
                ("QUERY", query.as_str()),
            ])
            .send()
            .map_err(|e| ExoskyError::ServiceError(format!("Gaia request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ExoskyError::ServiceError(format!(
                "Gaia archive returned status: {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| ExoskyError::DataError(format!("Invalid Gaia response: {}", e)))?;

        stars_from_table(&TapTable::from_json(&body)?)
    }
}

/// Build catalog stars from a Gaia result table
///
/// Masked positions and magnitudes are filled with NaN so that the caller
/// can decide what to do with incomplete rows; masked parallaxes stay `None`.
pub(crate) fn stars_from_table(table: &TapTable) -> Result<Vec<CatalogStar>> {
    if table.is_empty() {
        return Ok(Vec::new());
    }

    let ra = table.numeric("ra")?.filled(f64::NAN);
    let dec = table.numeric("dec")?.filled(f64::NAN);
    let magnitude = table.numeric("phot_g_mean_mag")?.filled(f64::NAN);
    let parallax = table.numeric("parallax")?;
    if parallax.masked_count() > 0 {
        debug!(
            "{} of {} Gaia sources have no parallax",
            parallax.masked_count(),
            table.len()
        );
    }

    Ok(ra
        .iter()
        .zip(dec.iter())
        .zip(magnitude.iter())
        .enumerate()
        .map(|(row, ((&ra, &dec), &mag))| CatalogStar::new(ra, dec, mag, parallax.get(row)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn region() -> SkyRegion {
        SkyRegion {
            ra_min: 346.1,
            ra_max: 347.1,
            dec_min: -5.5,
            dec_max: -4.5,
        }
    }

    #[test]
    fn test_query_for() {
        let query = GaiaArchive::query_for(&region(), 100);
        assert_eq!(
            query,
            "SELECT TOP 100 ra, dec, phot_g_mean_mag, parallax FROM gaiadr3.gaia_source \
             WHERE ra BETWEEN 346.1 AND 347.1 AND dec BETWEEN -5.5 AND -4.5"
        );
    }

    #[test]
    fn test_stars_from_table() {
        let body = json!({
            "metadata": [
                {"name": "ra"}, {"name": "dec"}, {"name": "phot_g_mean_mag"}, {"name": "parallax"}
            ],
            "data": [
                [346.5, -5.1, 12.3, 0.1],
                [346.6, -5.2, 15.0, null],
                [346.7, -5.3, null, -0.4]
            ]
        });
        let stars = stars_from_table(&TapTable::from_json(&body).unwrap()).unwrap();

        assert_eq!(stars.len(), 3);
        assert_eq!(stars[0], CatalogStar::new(346.5, -5.1, 12.3, Some(0.1)));
        assert_eq!(stars[1].parallax, None);
        assert!(stars[2].magnitude.is_nan());
        assert!(!stars[2].is_projectable());
        assert_eq!(stars[2].parallax, Some(-0.4));
        assert_eq!(stars[2].distance(), None);
    }

    #[test]
    fn test_empty_region() {
        let body = json!({
            "metadata": [
                {"name": "ra"}, {"name": "dec"}, {"name": "phot_g_mean_mag"}, {"name": "parallax"}
            ],
            "data": []
        });
        let stars = stars_from_table(&TapTable::from_json(&body).unwrap()).unwrap();
        assert!(stars.is_empty());
    }
}
