//! Keyed cache of query results with single-flight population and a
//! compressed secondary tier.
//!
//! Many worker threads call [`CompressedCache::get`] concurrently. Hits
//! never block beyond a shared read lock; a cold key single-flights the
//! external [`QuerySource::create`] call so the expensive query runs at
//! most once per key, and the value is published only after it is
//! complete. Published values are immutable and reference counted, so
//! eviction never races in-flight readers.

mod pool;

pub use pool::VectorPool;

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex, RwLock};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AccessError, AccessResult};

/// The collaborator that issues the real query on a cache miss.
pub trait QuerySource<K, R>: Send + Sync {
    fn create(&self, key: &K) -> AccessResult<Vec<R>>;
}

enum EntryState<R> {
    Live(Arc<Vec<R>>),
    Compressed(Vec<u8>),
}

struct Slot<R> {
    /// Serializes creators for this key; readers never touch it.
    init: Mutex<()>,
    state: RwLock<Option<EntryState<R>>>,
}

impl<R> Slot<R> {
    fn new() -> Self {
        Self {
            init: Mutex::new(()),
            state: RwLock::new(None),
        }
    }
}

/// Keyed cache of query result vectors.
pub struct CompressedCache<K, R, S> {
    source: S,
    slots: RwLock<HashMap<K, Arc<Slot<R>>>>,
    pool: Option<VectorPool<R>>,
}

impl<K, R, S> CompressedCache<K, R, S>
where
    K: Eq + Hash + Clone + Debug,
    R: Serialize + DeserializeOwned,
    S: QuerySource<K, R>,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            slots: RwLock::new(HashMap::new()),
            pool: None,
        }
    }

    /// Pooled mode: destroyed entries return their storage to `pool`.
    pub fn with_pool(source: S, pool: VectorPool<R>) -> Self {
        Self {
            source,
            slots: RwLock::new(HashMap::new()),
            pool: Some(pool),
        }
    }

    /// Fetch the value for `key`, computing it at most once.
    ///
    /// `create` failures propagate to the caller and leave nothing cached;
    /// the next `get` retries.
    pub fn get(&self, key: &K) -> AccessResult<Arc<Vec<R>>> {
        if let Some(slot) = self.slots.read().unwrap().get(key).cloned() {
            if let Some(value) = self.read_slot(&slot, key)? {
                return Ok(value);
            }
            return self.populate(key, &slot);
        }

        let slot = {
            let mut slots = self.slots.write().unwrap();
            slots
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Slot::new()))
                .clone()
        };
        if let Some(value) = self.read_slot(&slot, key)? {
            return Ok(value);
        }
        self.populate(key, &slot)
    }

    /// Remove the entry for `key`. In pooled mode the vector's storage is
    /// parked for reuse when no reader still holds it; otherwise the
    /// elements are simply dropped.
    pub fn destroy(&self, key: &K) {
        let slot = self.slots.write().unwrap().remove(key);
        let Some(slot) = slot else { return };
        let taken = slot.state.write().unwrap().take();
        if let (Some(EntryState::Live(value)), Some(pool)) = (taken, &self.pool) {
            if let Ok(vec) = Arc::try_unwrap(value) {
                pool.release(vec);
            }
        }
    }

    /// Demote the live entry for `key` to its compressed byte form,
    /// trading CPU on the next read for memory now. Returns `false` when
    /// there is no live entry to demote.
    pub fn compress_key(&self, key: &K) -> AccessResult<bool> {
        let slot = self.slots.read().unwrap().get(key).cloned();
        let Some(slot) = slot else { return Ok(false) };
        let mut state = slot.state.write().unwrap();
        let Some(EntryState::Live(value)) = &*state else {
            return Ok(false);
        };
        let bytes = self.compress(value)?;
        tracing::debug!(
            target: "faresql.cache",
            key = ?key,
            bytes = bytes.len(),
            "demoted entry to compressed tier"
        );
        *state = Some(EntryState::Compressed(bytes));
        Ok(true)
    }

    /// Flatten a record slice to its compact binary form.
    pub fn compress(&self, rows: &[R]) -> AccessResult<Vec<u8>> {
        let raw = bincode::serialize(rows)
            .map_err(|e| AccessError::compression(e.to_string()))?;
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&raw)
            .map_err(|e| AccessError::compression(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| AccessError::compression(e.to_string()))
    }

    /// Inverse of [`compress`](Self::compress); element-wise equal to the
    /// original per the record's own equality.
    pub fn uncompress(&self, bytes: &[u8]) -> AccessResult<Vec<R>> {
        uncompress_bytes(bytes)
    }

    /// The collaborator issuing the real queries.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Number of cached keys (any tier).
    pub fn len(&self) -> usize {
        self.slots.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_slot(&self, slot: &Slot<R>, key: &K) -> AccessResult<Option<Arc<Vec<R>>>> {
        {
            let state = slot.state.read().unwrap();
            match &*state {
                Some(EntryState::Live(value)) => return Ok(Some(value.clone())),
                Some(EntryState::Compressed(_)) => {}
                None => return Ok(None),
            }
        }

        // Inflate the compressed tier back to a live value.
        let mut state = slot.state.write().unwrap();
        match &*state {
            Some(EntryState::Live(value)) => Ok(Some(value.clone())),
            None => Ok(None),
            Some(EntryState::Compressed(bytes)) => match uncompress_bytes(bytes) {
                Ok(rows) => {
                    let value = Arc::new(rows);
                    *state = Some(EntryState::Live(value.clone()));
                    Ok(Some(value))
                }
                Err(err) => {
                    // Corrupted entries are invalidated, never served.
                    *state = None;
                    tracing::warn!(
                        target: "faresql.cache",
                        key = ?key,
                        error = %err,
                        "invalidated corrupted cache entry"
                    );
                    Err(err)
                }
            },
        }
    }

    fn populate(&self, key: &K, slot: &Slot<R>) -> AccessResult<Arc<Vec<R>>> {
        let _creating = slot.init.lock().unwrap();
        // Another creator may have published while we waited.
        if let Some(value) = self.read_slot(slot, key)? {
            return Ok(value);
        }

        tracing::debug!(target: "faresql.cache", key = ?key, "cache miss, querying source");
        let rows = self.source.create(key)?;
        let value = Arc::new(rows);
        *slot.state.write().unwrap() = Some(EntryState::Live(value.clone()));
        Ok(value)
    }
}

fn uncompress_bytes<R: DeserializeOwned>(bytes: &[u8]) -> AccessResult<Vec<R>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut raw = Vec::new();
    decoder
        .read_to_end(&mut raw)
        .map_err(|e| AccessError::compression(e.to_string()))?;
    bincode::deserialize(&raw).map_err(|e| AccessError::compression(e.to_string()))
}
