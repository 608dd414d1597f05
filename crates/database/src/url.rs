// database/url.rs - the url collection: model, queries and store implementations

pub mod memory;
pub mod model;
pub mod query;
pub mod store;

pub use memory::MemoryUrlStore;
pub use model::{UrlModel, COLLECTION_NAME, DATABASE_NAME};
pub use store::{MongoUrlStore, UrlStore};
