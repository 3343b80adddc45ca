//! Constants for catalog queries and projection

use std::f64::consts::PI;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;

// Regional queries
/// Half width of the box searched around a host star, in degrees
pub const REGION_HALF_WIDTH_DEG: f64 = 0.5;
/// Maximum number of stars requested from the astrometric catalog per region
pub const REGION_STAR_LIMIT: usize = 100;

// Magnitude scale
/// Magnitude offset in the visualization radius `10^((m + 5) / 5)`
pub const MAGNITUDE_OFFSET: f64 = 5.0;
/// Magnitudes per decade of visualization radius
pub const MAGNITUDES_PER_DECADE: f64 = 5.0;

// Services
/// NASA Exoplanet Archive TAP synchronous endpoint
pub const EXOPLANET_ARCHIVE_TAP_URL: &str = "https://exoplanetarchive.ipac.caltech.edu/TAP/sync";
/// Gaia archive TAP synchronous endpoint
pub const GAIA_TAP_URL: &str = "https://gea.esac.esa.int/tap-server/tap/sync";
/// OpenAI-compatible chat completions endpoint
pub const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Gaia source table queried for neighbouring stars
pub const GAIA_SOURCE_TABLE: &str = "gaiadr3.gaia_source";
/// Planetary systems table in the exoplanet archive
pub const PLANETARY_SYSTEMS_TABLE: &str = "ps";
