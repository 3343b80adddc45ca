//! Snapshot files
//!
//! Every successful star-field query can be kept as a JSON file, indented
//! by four spaces and named `<target>_star_data.json` inside a configured directory.
//! Each write goes to its own temporary file in the target directory and is
//! renamed into place, so a reader never sees a partial snapshot and
//! concurrent writers of the same name never share a file. The last rename
//! wins.

use std::env;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::Result;

/// Default snapshot directory: `$HOME/.cache/exosky/snapshots`
pub fn default_snapshot_dir() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".cache")
        .join("exosky")
        .join("snapshots")
}

/// Writes snapshot files into one directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Store writing into `dir`, which is created on first write
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the snapshot for `name`
    ///
    /// Characters that would leave the directory or upset common
    /// filesystems are replaced with `_`.
    pub fn path_for(&self, name: &str) -> PathBuf {
        let safe: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let safe = if safe.is_empty() || safe.chars().all(|c| c == '.') {
            "_".to_string()
        } else {
            safe
        };
        self.dir.join(format!("{}_star_data.json", safe))
    }

    /// Write `value` as the snapshot for `name`, returning the file path
    pub fn write(&self, name: &str, value: &Value) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(name);

        // Removed on drop if anything below fails
        let mut temp = NamedTempFile::new_in(&self.dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = Serializer::with_formatter(&mut writer, formatter);
            value.serialize(&mut serializer)?;
            writer.flush()?;
        }

        temp.persist(&path).map_err(|e| e.error)?;
        info!("Data saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::tempdir;

    fn read(store: &SnapshotStore, name: &str) -> Value {
        let text = fs::read_to_string(store.path_for(name)).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    /// Only the snapshot itself, no leftover temporary files
    fn assert_single_file(dir: &Path) {
        let entries: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap().path()).collect();
        assert_eq!(entries.len(), 1, "unexpected files: {:?}", entries);
    }

    #[test]
    fn test_default_dir() {
        let dir = default_snapshot_dir();
        assert!(dir.to_str().unwrap().contains(".cache/exosky/snapshots"));
    }

    #[test]
    fn test_path_for() {
        let store = SnapshotStore::new("/tmp/snaps");
        assert_eq!(
            store.path_for("TRAPPIST-1 e"),
            PathBuf::from("/tmp/snaps/TRAPPIST-1 e_star_data.json")
        );
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/tmp/snaps/.._etc_passwd_star_data.json")
        );
        assert_eq!(store.path_for(".."), PathBuf::from("/tmp/snaps/__star_data.json"));
        assert_eq!(store.path_for(""), PathBuf::from("/tmp/snaps/__star_data.json"));
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = tempdir().unwrap();
        let store = SnapshotStore::new(temp_dir.path().join("nested"));
        let value = json!({"exoplanet_data": [], "stars": [{"x": 1.5, "distance": null}]});

        let path = store.write("51 Peg b", &value).unwrap();
        assert!(path.exists());
        assert_single_file(&temp_dir.path().join("nested"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"stars\""), "snapshot should be pretty-printed");
        assert_eq!(read(&store, "51 Peg b"), value);
    }

    #[test]
    fn test_overwrite() {
        let temp_dir = tempdir().unwrap();
        let store = SnapshotStore::new(temp_dir.path());
        store.write("x", &json!({"v": 1})).unwrap();
        store.write("x", &json!({"v": 2})).unwrap();
        assert_eq!(read(&store, "x"), json!({"v": 2}));
    }

    #[test]
    fn test_concurrent_writes_same_name() {
        let temp_dir = tempdir().unwrap();
        let store = SnapshotStore::new(temp_dir.path());
        let writers = 4;

        for round in 0..10 {
            let barrier = Arc::new(Barrier::new(writers));
            let handles: Vec<_> = (0..writers)
                .map(|w| {
                    let store = store.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        let stars: Vec<Value> = (0..5_000 + w * 1_000)
                            .map(|i| json!({"ra": i as f64 * 0.001, "writer": w}))
                            .collect();
                        let value = json!({"exoplanet_data": [], "stars": stars});
                        barrier.wait();
                        store.write("TRAPPIST-1", &value).map(|_| w)
                    })
                })
                .collect();

            for handle in handles {
                assert!(handle.join().unwrap().is_ok(), "write failed in round {}", round);
            }

            let saved = read(&store, "TRAPPIST-1");
            let stars = saved["stars"].as_array().unwrap();
            let writer = stars[0]["writer"].as_u64().unwrap() as usize;
            assert_eq!(stars.len(), 5_000 + writer * 1_000);
            assert!(stars.iter().all(|s| s["writer"] == writer as u64));
            assert_single_file(temp_dir.path());
        }
    }

    #[test]
    fn test_unwritable_dir() {
        let temp_dir = tempdir().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"not a directory").unwrap();
        let store = SnapshotStore::new(blocker.join("sub"));
        assert!(store.write("x", &json!({})).is_err());
    }
}
