use domain::{Interaction, ToggleEntry};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

use crate::pending::{PendingWrite, WriteToken};

/// Synchronous namespace-keyed storage on the local device.
///
/// Callers treat it as infallible; implementations log and swallow errors.
pub trait LocalStore: Send + Sync {
    fn load(&self, namespace: &str) -> Option<String>;
    fn save(&self, namespace: &str, value: String);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocalStore for MemoryStore {
    fn load(&self, namespace: &str) -> Option<String> {
        self.lock().get(namespace).cloned()
    }

    fn save(&self, namespace: &str, value: String) {
        self.lock().insert(namespace.to_string(), value);
    }
}

/// One `<namespace>.json` file per namespace under `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{}.json", namespace))
    }
}

impl LocalStore for FileStore {
    fn load(&self, namespace: &str) -> Option<String> {
        match std::fs::read_to_string(self.path(namespace)) {
            Ok(s) => Some(s),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read local state '{}': {}", namespace, e);
                None
            }
        }
    }

    fn save(&self, namespace: &str, value: String) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            warn!("Failed to create state dir {:?}: {}", self.dir, e);
            return;
        }
        if let Err(e) = std::fs::write(self.path(namespace), value) {
            warn!("Failed to write local state '{}': {}", namespace, e);
        }
    }
}

/// Flag and counter maps of the toggle interactions, kept in a [`LocalStore`].
///
/// Every read and every count-then-flag write runs under one lock, so writers
/// on different subjects of a namespace never drop each other's keys.
#[derive(Clone)]
pub struct ToggleStore {
    store: Arc<dyn LocalStore>,
    lock: Arc<Mutex<()>>,
}

impl ToggleStore {
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn entry(&self, interaction: &Interaction) -> ToggleEntry {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ns = interaction.namespaces();
        let key = interaction.subject_key();
        let flags: BTreeMap<String, bool> = self.load_map(ns.flags);
        let counts: BTreeMap<String, Option<i64>> = self.load_map(ns.counts);
        ToggleEntry {
            active: flags.get(&key).copied().unwrap_or(false),
            count: counts.get(&key).copied().flatten(),
        }
    }

    /// Counter first, then flag.
    pub fn write(&self, interaction: &Interaction, entry: ToggleEntry) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let ns = interaction.namespaces();
        let key = interaction.subject_key();
        let entry = entry.normalized();

        let mut counts: BTreeMap<String, Option<i64>> = self.load_map(ns.counts);
        counts.insert(key.clone(), entry.count);
        self.save_map(ns.counts, &counts);

        let mut flags: BTreeMap<String, bool> = self.load_map(ns.flags);
        flags.insert(key, entry.active);
        self.save_map(ns.flags, &flags);
    }

    fn load_map<V: DeserializeOwned>(&self, namespace: &str) -> BTreeMap<String, V> {
        let Some(raw) = self.store.load(namespace) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Discarding unreadable local state '{}': {}", namespace, e);
            BTreeMap::new()
        })
    }

    fn save_map<V: Serialize>(&self, namespace: &str, map: &BTreeMap<String, V>) {
        match serde_json::to_string(map) {
            Ok(raw) => self.store.save(namespace, raw),
            Err(e) => warn!("Failed to encode local state '{}': {}", namespace, e),
        }
    }
}

impl PendingWrite for ToggleStore {
    type Key = Interaction;
    type Value = ToggleEntry;

    fn begin(&self, key: Interaction, optimistic: ToggleEntry) -> WriteToken<Interaction> {
        self.write(&key, optimistic);
        WriteToken::new(key)
    }

    fn commit(&self, _token: WriteToken<Interaction>) {}

    fn rollback(&self, token: WriteToken<Interaction>, previous: ToggleEntry) {
        self.write(token.key(), previous);
    }
}
