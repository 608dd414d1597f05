// config.rs - Configuration type for the API

use super::service::RecordService;

pub const SERVICE_NAME: &str = "MongoDB URL Service";
pub use database::url::{COLLECTION_NAME, DATABASE_NAME};

#[derive(Clone)]
pub struct Config {
    pub records: RecordService,
    pub database: String,
    pub collection: String,
}

impl Config {
    pub fn new(records: RecordService) -> Self {
        Config {
            records,
            database: DATABASE_NAME.to_string(),
            collection: COLLECTION_NAME.to_string(),
        }
    }
}
