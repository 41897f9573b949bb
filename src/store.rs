// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store: typed collections persisted as JSON arrays in a
//! [`KeyValueStore`].
//!
//! Every read deserialises a fresh snapshot, every write replaces the whole
//! collection. Backend failures are logged and swallowed so callers always
//! get a usable (possibly empty) answer. Entries that do not decode are
//! hidden from readers but written back untouched.

use crate::db::KeyValueStore;
use crate::error::StoreError;
use crate::models::{Collection, Goal, Record, Transaction, TransactionKind};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// What [`RecordStore::inspect`] found under a collection key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionHealth {
    Missing,
    Healthy { records: usize, rejected: usize },
    Corrupt { reason: String },
}

/// One stored entry: a decoded record, or the raw value when it does not
/// decode as one.
#[derive(Serialize)]
#[serde(untagged)]
enum Entry<R> {
    Record(R),
    Opaque(Value),
}

impl<R: Record> Entry<R> {
    /// Opaque entries match on a numeric or numeric-string `id`.
    fn id(&self) -> Option<i64> {
        match self {
            Entry::Record(r) => Some(r.id()),
            Entry::Opaque(v) => match v.get("id")? {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            },
        }
    }
}

pub struct RecordStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// All records in insertion order. Absent or corrupt collections read as
    /// empty; individual malformed entries are skipped.
    pub fn list<R: Record>(&self, collection: Collection) -> Vec<R> {
        self.entries::<R>(collection)
            .into_iter()
            .filter_map(|e| match e {
                Entry::Record(r) => Some(r),
                Entry::Opaque(_) => None,
            })
            .collect()
    }

    pub fn get_by_id<R: Record>(&self, collection: Collection, id: i64) -> Option<R> {
        self.list::<R>(collection).into_iter().find(|r| r.id() == id)
    }

    /// Appends a record with a fresh id and persists the collection.
    pub fn create<R: Record>(&mut self, collection: Collection, draft: R::Draft) -> R {
        let mut entries = self.entries::<R>(collection);
        let id = next_id(&entries);
        let record = R::from_draft(id, draft);
        entries.push(Entry::Record(record.clone()));
        self.write_document(collection.key(), &entries);
        debug!(collection = collection.key(), id, "created record");
        record
    }

    /// Merges `patch` over the record with `id`. `None` when no such record
    /// exists, in which case nothing is written.
    pub fn update<R: Record>(
        &mut self,
        collection: Collection,
        id: i64,
        patch: R::Patch,
    ) -> Option<R> {
        let mut entries = self.entries::<R>(collection);
        let found = entries.iter_mut().find_map(|e| match e {
            Entry::Record(r) if r.id() == id => Some(r),
            _ => None,
        });
        let Some(item) = found else {
            warn!(collection = collection.key(), id, "update of unknown record ignored");
            return None;
        };
        item.merge(patch);
        let updated = item.clone();
        self.write_document(collection.key(), &entries);
        debug!(collection = collection.key(), id, "updated record");
        Some(updated)
    }

    /// Removes every entry with `id`, including undecodable ones whose `id`
    /// reads as the same number. Nothing is written when none match.
    pub fn delete<R: Record>(&mut self, collection: Collection, id: i64) {
        let mut entries = self.entries::<R>(collection);
        let before = entries.len();
        entries.retain(|e| e.id() != Some(id));
        if entries.len() == before {
            warn!(collection = collection.key(), id, "delete of unknown record ignored");
            return;
        }
        self.write_document(collection.key(), &entries);
        debug!(collection = collection.key(), id, "deleted record");
    }

    pub fn transactions(&self, kind: TransactionKind) -> Vec<Transaction> {
        self.list(kind.collection())
    }

    pub fn goals(&self) -> Vec<Goal> {
        self.list(Collection::Goals)
    }

    pub fn inspect<R: Record>(&self, collection: Collection) -> CollectionHealth {
        let raw = match self.backend.get(collection.key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CollectionHealth::Missing,
            Err(e) => {
                return CollectionHealth::Corrupt {
                    reason: e.to_string(),
                };
            }
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => {
                let total = values.len();
                let records = values
                    .into_iter()
                    .filter(|v| serde_json::from_value::<R>(v.clone()).is_ok())
                    .count();
                CollectionHealth::Healthy {
                    records,
                    rejected: total - records,
                }
            }
            Err(e) => CollectionHealth::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    /// Reads a single JSON document stored under `key`, falling back to
    /// `R::default()` when absent or unreadable.
    pub fn read_document<R>(&self, key: &str) -> R
    where
        R: serde::de::DeserializeOwned + Default,
    {
        match self.backend.get(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                error!(key, "corrupt document, using defaults: {}", e);
                R::default()
            }),
            Ok(None) => R::default(),
            Err(e) => {
                error!(key, "failed to read document: {}", e);
                R::default()
            }
        }
    }

    /// Persists `value` under `key`. Failures are logged, never returned.
    pub fn write_document<R: serde::Serialize>(&mut self, key: &str, value: &R) {
        let written = serde_json::to_string(value)
            .map_err(|source| StoreError::Encode {
                key: key.to_string(),
                source,
            })
            .and_then(|json| self.backend.set(key, &json));
        if let Err(e) = written {
            error!(key, "failed to persist document: {}", e);
        }
    }

    /// Removes the document under `key`. Failures are logged, never returned.
    pub fn remove_document(&mut self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            error!(key, "failed to remove document: {}", e);
        }
    }

    fn entries<R: Record>(&self, collection: Collection) -> Vec<Entry<R>> {
        self.read_values(collection)
            .into_iter()
            .map(|v| match serde_json::from_value::<R>(v.clone()) {
                Ok(r) => Entry::Record(r),
                Err(e) => {
                    warn!(collection = collection.key(), "skipping malformed record: {}", e);
                    Entry::Opaque(v)
                }
            })
            .collect()
    }

    fn read_values(&self, collection: Collection) -> Vec<Value> {
        let key = collection.key();
        match self.backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
                Ok(v) => v.unwrap_or_default(),
                Err(e) => {
                    error!(collection = key, "corrupt collection, reading as empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(collection = key, "failed to read collection: {}", e);
                Vec::new()
            }
        }
    }
}

/// Millisecond timestamp, bumped past the largest existing id so ids stay
/// unique and increasing within a collection. Once the id space above the
/// largest id is exhausted, the lowest free positive id is used instead.
fn next_id<R: Record>(entries: &[Entry<R>]) -> i64 {
    let now = Utc::now().timestamp_millis();
    let Some(max) = entries.iter().filter_map(Entry::id).max() else {
        return now;
    };
    if max < now {
        return now;
    }
    if let Some(id) = max.checked_add(1) {
        return id;
    }
    let taken: HashSet<i64> = entries.iter().filter_map(Entry::id).collect();
    let id = (1..i64::MAX).find(|c| !taken.contains(c)).unwrap_or(now);
    error!(max, id, "record ids exhausted, reusing lowest free id");
    id
}
