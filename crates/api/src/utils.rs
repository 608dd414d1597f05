// utils.rs - utility functions used across modules

use mongodb::bson::Bson;
use serde_json::Value;

// BSON to JSON for response bodies. Strings stay plain, other types use
// relaxed extended JSON.
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::String(s) => Value::String(s),
        other => other.into_relaxed_extjson(),
    }
}
