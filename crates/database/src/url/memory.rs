// database/url/memory.rs - in-process UrlStore used by tests

use super::model::UrlModel;
use super::store::UrlStore;
use crate::error::StoreError;
use async_trait::async_trait;
use mongodb::bson::{from_document, Bson, Document};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::RwLock;

/// Keeps documents in insertion order and mimics the MongoDB store's
/// semantics: lowest `_id` first, no-op writes report nothing modified.
#[derive(Debug, Default)]
pub struct MemoryUrlStore {
    documents: RwLock<Vec<Document>>,
    unreachable: AtomicBool,
    closed: AtomicBool,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail as if the server went away.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, AtomicOrdering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(AtomicOrdering::SeqCst)
    }

    /// Copy of the stored documents, for assertions.
    pub fn documents(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.unreachable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::Unavailable("server selection timeout".into()));
        }
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Document>>, StoreError> {
        self.documents
            .read()
            .map_err(|_| StoreError::Unavailable("poisoned lock".into()))
    }
}

// Orders the id types seen in practice; anything else compares equal so
// insertion order decides.
fn compare_ids(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (Some(Bson::ObjectId(a)), Some(Bson::ObjectId(b))) => a.bytes().cmp(&b.bytes()),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (Some(Bson::Int32(a)), Some(Bson::Int32(b))) => a.cmp(b),
        (Some(Bson::Int64(a)), Some(Bson::Int64(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }

    async fn first(&self) -> Result<Option<UrlModel>, StoreError> {
        self.check()?;
        let documents = self.read()?;

        match documents
            .iter()
            .min_by(|a, b| compare_ids(a.get("_id"), b.get("_id")))
        {
            Some(document) => Ok(Some(from_document(document.clone())?)),
            None => Ok(None),
        }
    }

    async fn set_uri(&self, id: &Bson, uri: &str) -> Result<Option<UrlModel>, StoreError> {
        self.check()?;
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::Unavailable("poisoned lock".into()))?;

        let Some(document) = documents.iter_mut().find(|d| d.get("_id") == Some(id)) else {
            return Ok(None);
        };
        if document.get_str("uri").ok() == Some(uri) {
            return Ok(None);
        }

        let before = document.clone();
        document.insert("uri", uri);
        Ok(Some(from_document(before)?))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.check()?;
        Ok(self.read()?.len() as u64)
    }

    async fn close(&self) {
        self.closed.store(true, AtomicOrdering::SeqCst);
    }
}
