// database/url/query.rs - query functions for the url collection

use super::model::{UrlModel, COLLECTION_NAME};
use crate::error::StoreError;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{FindOneAndUpdateOptions, FindOneOptions, ReturnDocument},
    Client, Collection,
};

fn collection(client: &Client, database: &str) -> Collection<UrlModel> {
    client.database(database).collection(COLLECTION_NAME)
}

// Round trip to the server without touching any collection
pub async fn ping(client: &Client) -> Result<(), StoreError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 }, None)
        .await?;
    Ok(())
}

// The record with the lowest _id, if any
pub async fn get_first_url(client: &Client, database: &str) -> Result<Option<UrlModel>, StoreError> {
    let options = FindOneOptions::builder().sort(doc! { "_id": 1 }).build();

    let result = collection(client, database).find_one(None, options).await?;
    Ok(result)
}

// Set uri on the record with the given id. Returns the record as it was before
// the write, or None when nothing was modified (missing id or same value).
pub async fn set_uri(
    client: &Client,
    database: &str,
    id: &Bson,
    uri: &str,
) -> Result<Option<UrlModel>, StoreError> {
    let options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::Before)
        .build();

    let result = collection(client, database)
        .find_one_and_update(
            doc! { "_id": id.clone(), "uri": { "$ne": uri } },
            doc! { "$set": { "uri": uri } },
            options,
        )
        .await?;
    Ok(result)
}

pub async fn count_urls(client: &Client, database: &str) -> Result<u64, StoreError> {
    let count = collection(client, database).count_documents(None, None).await?;
    Ok(count)
}

// Drop the collection and insert a single record holding uri
pub async fn reset_url(client: &Client, database: &str, uri: &str) -> Result<Bson, StoreError> {
    let collection: Collection<Document> = client.database(database).collection(COLLECTION_NAME);

    collection.drop(None).await?;
    let result = collection.insert_one(doc! { "uri": uri }, None).await?;
    Ok(result.inserted_id)
}
