//! Data module for persisting star-field results
//!
//! This module writes point-in-time snapshots of query results to disk.

mod snapshot;

pub use snapshot::{default_snapshot_dir, SnapshotStore};
