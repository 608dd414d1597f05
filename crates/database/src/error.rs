// database/error.rs - errors raised while talking to the document store

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed record: {0}")]
    Malformed(#[from] mongodb::bson::de::Error),
}
