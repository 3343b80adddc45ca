//! Exosky: exoplanet host-star neighbourhoods in 3D
//!
//! This crate resolves an exoplanet (or host star) name against the NASA
//! Exoplanet Archive, pulls the Gaia stars surrounding each host, and places
//! them in a magnitude-scaled 3D frame for visualization. Results are
//! normalized into plain JSON, served over HTTP and written to snapshot files.

use thiserror::Error;

pub mod catalogs;
pub mod chat;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod data;
pub mod normalize;
pub mod payload;
pub mod query;
pub mod server;

// Re-export commonly used types
pub use catalogs::{AstrometricCatalog, CatalogStar, ExoplanetArchive, HostStarRecord};
pub use config::ExoskyConfig;
pub use coordinates::{project, Cartesian3, SkyCoord, SkyRegion};
pub use normalize::{normalize, Datum, MaskedArray};
pub use payload::{ProjectedStar, ResponsePayload};
pub use query::{Lookup, QueryReport, StarFieldQuery};

/// Main error type for the exosky library
#[derive(Debug, Error)]
pub enum ExoskyError {
    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for exosky operations
pub type Result<T> = std::result::Result<T, ExoskyError>;
