pub mod backend;
mod seed;

use std::sync::{Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};

/// Named record holding the patient collection.
pub const PATIENTS_KEY: &str = "dc_patients";
/// Named record holding the appointment collection.
pub const APPOINTMENTS_KEY: &str = "dc_appointments";

/// Key-value persistence for the two entity collections, each stored as a
/// single JSON document under a fixed key.
///
/// Reads never fail: absent or unreadable data degrades to the caller's
/// fallback. Writes are absorbed on error so repository operations stay
/// total. A broadcast channel announces written keys so observers can
/// re-read after an external change; it is advisory only and provides no
/// cross-process synchronization.
pub struct Store {
    backend: Box<dyn KeyValueBackend>,
    write_lock: Mutex<()>,
    changes: broadcast::Sender<String>,
}

impl Store {
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            backend,
            write_lock: Mutex::new(()),
            changes,
        }
    }

    /// Opens the file-backed store under the configured data directory,
    /// falling back to an ephemeral in-memory store when the directory
    /// cannot be used.
    pub fn open(config: &AppConfig) -> Self {
        match FileBackend::new(&config.data_dir) {
            Ok(backend) => Self::new(Box::new(backend)),
            Err(e) => {
                warn!(
                    "data dir {} unusable ({}), falling back to in-memory store",
                    config.data_dir.display(),
                    e
                );
                Self::new(Box::new(MemoryBackend::default()))
            }
        }
    }

    /// Returns the parsed collection under `key`, or `fallback` when the
    /// record is absent or unreadable.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.backend.get(key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!("unreadable data under {}, using fallback: {}", key, e);
                    fallback
                }
            },
            None => fallback,
        }
    }

    /// Serializes and persists `value` under `key`, then announces the
    /// change to subscribers.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                self.backend.put(key, &raw);
                let _ = self.changes.send(key.to_string());
            }
            Err(e) => warn!("failed to serialize {}: {}", key, e),
        }
    }

    /// Serializes read-check-write sequences within this process so a
    /// conflicting write never partially applies. External processes
    /// sharing the same data directory are not covered by this guard.
    pub fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Advisory feed of written keys, for re-reading after external writes.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        let receiver = self.changes.subscribe();
        debug!("new change subscriber registered");
        receiver
    }

    /// Globally-unique opaque identifier for new records.
    pub fn new_id() -> Uuid {
        Uuid::new_v4()
    }
}
