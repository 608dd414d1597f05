// database/url/store.rs - the UrlStore seam and its MongoDB implementation

use super::model::UrlModel;
use super::query::{count_urls, get_first_url, ping, set_uri};
use crate::error::StoreError;
use async_trait::async_trait;
use mongodb::{bson::Bson, Client};
use tracing::{debug, info};

/// Access to the singleton url record.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Cheap liveness check against the backing store.
    async fn ping(&self) -> Result<(), StoreError>;

    /// The record with the lowest identifier, if the collection has any.
    async fn first(&self) -> Result<Option<UrlModel>, StoreError>;

    /// Sets `uri` on the record identified by `id` and returns the record as it
    /// was before the write. `None` means zero documents were modified, either
    /// because the id is gone or because it already holds `uri`.
    async fn set_uri(&self, id: &Bson, uri: &str) -> Result<Option<UrlModel>, StoreError>;

    /// Number of documents in the collection.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Releases network resources. Called once on shutdown.
    async fn close(&self);
}

#[derive(Clone, Debug)]
pub struct MongoUrlStore {
    client: Client,
    database: String,
}

impl MongoUrlStore {
    /// Creates a client for `uri` and verifies the server answers a ping.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        debug!("Creating MongoDB client");
        let client = Client::with_uri_str(uri).await?;

        ping(&client).await?;
        info!("Connected to MongoDB, database {}", database);

        Ok(Self {
            client,
            database: database.to_string(),
        })
    }
}

#[async_trait]
impl UrlStore for MongoUrlStore {
    async fn ping(&self) -> Result<(), StoreError> {
        ping(&self.client).await
    }

    async fn first(&self) -> Result<Option<UrlModel>, StoreError> {
        get_first_url(&self.client, &self.database).await
    }

    async fn set_uri(&self, id: &Bson, uri: &str) -> Result<Option<UrlModel>, StoreError> {
        set_uri(&self.client, &self.database, id, uri).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        count_urls(&self.client, &self.database).await
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("MongoDB connection closed");
    }
}
