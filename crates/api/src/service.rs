// service.rs - operations on the singleton url record

use super::error::ServiceError;
use database::url::{MongoUrlStore, UrlModel, UrlStore};
use mongodb::bson::Bson;
use std::sync::Arc;
use tracing::{error, info, warn};

/// The uri of the first record.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUri {
    pub uri: Option<Bson>,
}

/// A successful write of a new uri.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedUri {
    pub uri: String,
    pub previous_uri: Option<Bson>,
    pub id: String,
}

/// Runs every operation against one shared store handle. The handle is
/// either present for the whole process lifetime or absent; it is never
/// re-established after a failed connect.
#[derive(Clone)]
pub struct RecordService {
    store: Option<Arc<dyn UrlStore>>,
}

impl RecordService {
    /// Connects to MongoDB and pings it. Failures are logged and produce a
    /// service without a handle.
    pub async fn connect(uri: &str, database: &str) -> Self {
        info!("Connecting to MongoDB...");
        match MongoUrlStore::connect(uri, database).await {
            Ok(store) => {
                info!("Connected to MongoDB");
                Self::with_store(Arc::new(store))
            }
            Err(e) => {
                error!("Error connecting to MongoDB: {}", e);
                Self::disconnected()
            }
        }
    }

    pub fn with_store(store: Arc<dyn UrlStore>) -> Self {
        RecordService { store: Some(store) }
    }

    pub fn disconnected() -> Self {
        RecordService { store: None }
    }

    pub fn is_connected(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&Arc<dyn UrlStore>, ServiceError> {
        self.store.as_ref().ok_or(ServiceError::NotConnected)
    }

    pub async fn health(&self) -> Result<(), ServiceError> {
        let store = self.store()?;
        store.ping().await.map_err(ServiceError::Unreachable)
    }

    pub async fn get_record(&self) -> Result<CurrentUri, ServiceError> {
        let store = self.store()?;

        let Some(record) = store.first().await? else {
            warn!("No record found in the url collection");
            return Err(ServiceError::NoRecord);
        };

        info!("Record found: {:?}", record);
        info!("Extracted URI: {:?}", record.uri);

        Ok(CurrentUri { uri: record.uri })
    }

    pub async fn update_record(&self, new_uri: &str) -> Result<UpdatedUri, ServiceError> {
        let store = self.store()?;

        let Some(existing) = store.first().await? else {
            warn!("No record found to update");
            return Err(ServiceError::NoRecord);
        };

        let Some(before) = store.set_uri(&existing.id, new_uri).await? else {
            warn!("Record {} was not modified", existing.id_string());
            return Err(ServiceError::NotModified);
        };

        let UrlModel { uri: previous_uri, .. } = before;
        let id = existing.id_string();
        info!(
            "Record {} updated. Previous value: {:?}. New value: {}",
            id, previous_uri, new_uri
        );

        Ok(UpdatedUri {
            uri: new_uri.to_string(),
            previous_uri,
            id,
        })
    }

    pub async fn count_records(&self) -> Result<u64, ServiceError> {
        let store = self.store()?;
        Ok(store.count().await?)
    }

    /// Releases the store handle, if any.
    pub async fn close(&self) {
        if let Some(store) = &self.store {
            store.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::url::MemoryUrlStore;
    use database::StoreError;
    use mongodb::bson::{doc, oid::ObjectId};

    fn service_over(store: MemoryUrlStore) -> (RecordService, Arc<MemoryUrlStore>) {
        let store = Arc::new(store);
        (RecordService::with_store(store.clone()), store)
    }

    #[actix_web::test]
    async fn disconnected_reports_not_connected() {
        let service = RecordService::disconnected();

        assert!(!service.is_connected());
        assert!(matches!(service.health().await, Err(ServiceError::NotConnected)));
        assert!(matches!(service.get_record().await, Err(ServiceError::NotConnected)));
        assert!(matches!(
            service.update_record("B").await,
            Err(ServiceError::NotConnected)
        ));
        assert!(matches!(
            service.count_records().await,
            Err(ServiceError::NotConnected)
        ));
    }

    #[actix_web::test]
    async fn unreachable_store() {
        let (service, store) = service_over(MemoryUrlStore::new());
        store.set_unreachable(true);

        assert!(matches!(
            service.health().await,
            Err(ServiceError::Unreachable(StoreError::Unavailable(_)))
        ));
        assert!(matches!(service.get_record().await, Err(ServiceError::Store(_))));
    }

    #[actix_web::test]
    async fn update_keeps_object_id_hex() {
        let oid = ObjectId::new();
        let (service, _) = service_over(MemoryUrlStore::with_documents(vec![
            doc! { "_id": oid, "uri": "A" },
        ]));

        let updated = service.update_record("B").await.unwrap();
        assert_eq!(updated.id, oid.to_hex());
        assert_eq!(updated.previous_uri, Some(Bson::String("A".into())));

        let current = service.get_record().await.unwrap();
        assert_eq!(current.uri, Some(Bson::String("B".into())));
    }

    #[actix_web::test]
    async fn update_of_same_value_is_not_modified() {
        let (service, _) = service_over(MemoryUrlStore::with_documents(vec![
            doc! { "_id": "X", "uri": "A" },
        ]));

        assert!(matches!(
            service.update_record("A").await,
            Err(ServiceError::NotModified)
        ));
    }

    #[actix_web::test]
    async fn close_releases_store() {
        let (service, store) = service_over(MemoryUrlStore::new());
        service.close().await;
        assert!(store.is_closed());
    }
}
