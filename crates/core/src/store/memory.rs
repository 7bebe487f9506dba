use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{new_revision, DocumentStore, StoreError, StoreResult};
use crate::document::{DocumentKey, StoredDocument};
use crate::flag::Flag;

/// In-process backend for development and tests. Same semantics as the
/// PostgreSQL store, nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: HashMap<String, Entry>,
    flags: Vec<Flag>,
    sequence: u64,
}

#[derive(Debug)]
struct Entry {
    data: Value,
    revision: String,
    created_seq: u64,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn put(&self, key: &str, data: Value, if_revision: Option<&str>) -> StoreResult<String> {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let revision = new_revision();

        if let Some(expected) = if_revision {
            let current = state.documents.get(key).map(|e| e.revision.as_str());
            if current != Some(expected) {
                return Err(StoreError::RevisionMismatch {
                    key: key.to_string(),
                    expected: expected.to_string(),
                });
            }
        }

        if let Some(entry) = state.documents.get_mut(key) {
            entry.data = data;
            entry.revision = revision.clone();
        } else {
            state.sequence += 1;
            state.documents.insert(
                key.to_string(),
                Entry {
                    data,
                    revision: revision.clone(),
                    created_seq: state.sequence,
                },
            );
        }

        Ok(revision)
    }

    async fn insert(&self, key: &str, data: Value) -> StoreResult<String> {
        let mut state = self.state.write().await;
        if state.documents.contains_key(key) {
            return Err(StoreError::AlreadyExists {
                key: key.to_string(),
            });
        }

        let revision = new_revision();
        state.sequence += 1;
        let created_seq = state.sequence;
        state.documents.insert(
            key.to_string(),
            Entry {
                data,
                revision: revision.clone(),
                created_seq,
            },
        );
        Ok(revision)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<StoredDocument>> {
        let state = self.state.read().await;
        Ok(state.documents.get(key).map(|entry| StoredDocument {
            key: key.to_string(),
            data: entry.data.clone(),
            revision: entry.revision.clone(),
        }))
    }

    async fn list_items(&self) -> StoreResult<Vec<StoredDocument>> {
        let state = self.state.read().await;
        let mut entries: Vec<(&String, &Entry)> = state
            .documents
            .iter()
            .filter(|(key, _)| DocumentKey::parse(key).is_item())
            .collect();
        entries.sort_by(|a, b| b.1.created_seq.cmp(&a.1.created_seq));

        Ok(entries
            .into_iter()
            .map(|(key, entry)| StoredDocument {
                key: key.clone(),
                data: entry.data.clone(),
                revision: entry.revision.clone(),
            })
            .collect())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        Ok(self.state.write().await.documents.remove(key).is_some())
    }

    async fn add_flag(&self, flag: &Flag) -> StoreResult<()> {
        self.state.write().await.flags.push(flag.clone());
        Ok(())
    }

    async fn list_flags(&self) -> StoreResult<Vec<Flag>> {
        Ok(self.state.read().await.flags.clone())
    }

    async fn remove_flags(&self, item_id: &str) -> StoreResult<u64> {
        let mut state = self.state.write().await;
        let before = state.flags.len();
        state.flags.retain(|flag| flag.item_id != item_id);
        Ok((before - state.flags.len()) as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
