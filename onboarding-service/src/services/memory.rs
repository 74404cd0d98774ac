use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::DocumentStore;

/// In-process [`DocumentStore`] for tests and local wiring.
///
/// Filters match on top-level field equality only. Starts disconnected, like
/// the real gateway.
pub struct InMemoryStore {
    connected: AtomicBool,
    reject_writes: AtomicBool,
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            reject_writes: AtomicBool::new(false),
            collections: Mutex::new(HashMap::new()),
        }
    }

    /// Makes subsequent `insert_one` calls fail with a write error.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    /// Stores `document` directly, bypassing the connection check.
    pub fn seed(&self, collection: &str, document: Document) -> Result<(), anyhow::Error> {
        self.collections
            .lock()
            .map_err(|e| anyhow::anyhow!("In-memory store mutex poisoned: {}", e))?
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|collections| collections.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn ensure_connected(&self) -> Result<(), AppError> {
        if self.is_connected() {
            Ok(())
        } else {
            Err(AppError::ServiceUnavailable)
        }
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn connect(&self) -> Result<(), AppError> {
        self.connected.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        self.ensure_connected()?;
        let collections = self.collections.lock().map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("In-memory store mutex poisoned: {}", e))
        })?;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| matches_filter(doc, &filter)))
            .cloned())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Bson, AppError> {
        self.ensure_connected()?;
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(AppError::WriteError(anyhow::anyhow!(
                "write rejected by store"
            )));
        }

        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Bson::ObjectId(ObjectId::new());
                document.insert("_id", id.clone());
                id
            }
        };

        self.seed(collection, document)
            .map_err(AppError::InternalError)?;
        Ok(id)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.ensure_connected()
    }
}
