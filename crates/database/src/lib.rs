// database/lib.rs - storage layer for the singleton url record

pub mod error;
pub mod url;

pub use error::StoreError;
