// database/url/model.rs - model for the url collection

use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};

pub const DATABASE_NAME: &str = "ngrok";
pub const COLLECTION_NAME: &str = "url";

/// A document of the `url` collection.
///
/// Only `_id` and `uri` are interpreted; every other field is carried in
/// `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlModel {
    #[serde(rename = "_id")]
    pub id: Bson,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Bson>,
    #[serde(flatten)]
    pub extra: Document,
}

impl UrlModel {
    /// String form of the identifier: hex for ObjectIds, the raw value for strings.
    pub fn id_string(&self) -> String {
        match &self.id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, from_document, oid::ObjectId};

    #[test]
    fn keeps_unknown_fields() {
        let oid = ObjectId::new();
        let model: UrlModel =
            from_document(doc! { "_id": oid, "uri": "https://a.ngrok.app", "owner": "ops" })
                .unwrap();

        assert_eq!(model.id, Bson::ObjectId(oid));
        assert_eq!(model.uri, Some(Bson::String("https://a.ngrok.app".into())));
        assert_eq!(model.extra.get_str("owner").unwrap(), "ops");
        assert!(!model.extra.contains_key("uri"));
    }

    #[test]
    fn missing_uri_is_none() {
        let model: UrlModel = from_document(doc! { "_id": "only-id" }).unwrap();
        assert_eq!(model.uri, None);
    }

    #[test]
    fn id_string_forms() {
        let oid = ObjectId::new();
        let mut model: UrlModel = from_document(doc! { "_id": oid }).unwrap();
        assert_eq!(model.id_string(), oid.to_hex());

        model.id = Bson::String("X".into());
        assert_eq!(model.id_string(), "X");

        model.id = Bson::Int32(7);
        assert_eq!(model.id_string(), "7");
    }
}
