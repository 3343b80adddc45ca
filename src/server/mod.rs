//! # HTTP server
//!
//! Axum server exposing the star-field query and the chat pass-through:
//!
//! - `GET /fetch-stars/{name}`: normalized star field, or 404
//! - `POST /chatgpt`: `{"message": ..}` in, `{"response": ..}` out
//! - `GET /health`
//!
//! The query and chat clients block, so handlers run them on the blocking
//! thread pool. State is immutable and shared between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::catalogs::{GaiaArchive, NasaExoplanetArchive};
use crate::chat::{CompletionService, OpenAiChat};
use crate::config::ExoskyConfig;
use crate::data::SnapshotStore;
use crate::query::{Lookup, StarFieldQuery};
use crate::Result;

pub mod handlers;

/// Shared application state
pub struct AppState {
    pub query: StarFieldQuery,
    pub chat: Box<dyn CompletionService + Send + Sync>,
    /// Where snapshots go, `None` to skip persisting
    pub snapshots: Option<SnapshotStore>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the production collaborators described by `config`
    ///
    /// The clients block on I/O and must be created and dropped outside of
    /// an async runtime.
    pub fn from_config(config: &ExoskyConfig) -> Result<Self> {
        let timeout = config.request_timeout();
        let archive = NasaExoplanetArchive::with_url(&config.exoplanet_archive_url, timeout)?;
        let catalog = GaiaArchive::with_url(&config.gaia_tap_url, timeout)?;
        let chat = OpenAiChat::new(
            &config.chat.api_url,
            config.chat_api_key(),
            &config.chat.model,
            config.chat.max_tokens,
            timeout,
        )?;

        let query = StarFieldQuery::new(Box::new(archive), Box::new(catalog))
            .with_half_width(config.region_half_width_deg)
            .with_limit(config.region_star_limit);

        Ok(Self {
            query,
            chat: Box::new(chat),
            snapshots: config
                .persist_snapshots
                .then(|| SnapshotStore::new(&config.output_dir)),
        })
    }

    /// Run the star-field query for `name` and persist the result
    ///
    /// Returns the normalized payload, or `None` when the name does not
    /// resolve. A failed snapshot write is logged and does not affect the
    /// returned value.
    pub fn fetch_star_field(&self, name: &str) -> Option<Value> {
        info!("Fetching star data for: {}", name);
        let payload = match self.query.run(name) {
            Lookup::Found { payload, report } => {
                if report.regions_failed > 0 {
                    warn!(
                        "{} of {} regions failed for {}",
                        report.regions_failed, report.regions_queried, name
                    );
                }
                payload
            }
            Lookup::NotFound => return None,
        };

        let value = payload.to_json();
        if let Some(store) = &self.snapshots {
            if let Err(e) = store.write(name, &value) {
                warn!("Error saving data to file: {}", e);
            }
        }
        Some(value)
    }
}

/// Build the router over `state`
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/fetch-stars/:name",
            get(handlers::fetch_stars).options(handlers::preflight),
        )
        .route(
            "/chatgpt",
            post(handlers::chatgpt).options(handlers::preflight),
        )
        .route("/health", get(handlers::health))
        .layer(middleware::map_response(allow_any_origin))
        .with_state(state)
}

/// Let browser front-ends on other origins call the API
async fn allow_any_origin(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

/// Serve until the listener fails
pub async fn serve(state: SharedState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Exosky server running at http://{}", addr);
    info!("   Stars: GET /fetch-stars/{{name}}");
    info!("   Chat:  POST /chatgpt");

    axum::serve(listener, app).await?;
    Ok(())
}
