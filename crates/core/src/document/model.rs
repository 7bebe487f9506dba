use serde_json::{Map, Value};

/// A JSON document as held by a storage backend.
/// Maps to one row of the `items` table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub key: String,
    /// Opaque JSON payload, returned verbatim on `GET`.
    pub data: Value,
    /// Server-assigned token replaced on every write.
    pub revision: String,
}

impl StoredDocument {
    /// Listing shape: `{ id: key, ...data }`.
    ///
    /// Fields inside `data` win over the injected `id`. Non-object payloads
    /// are wrapped as `{ id, value }`.
    pub fn into_list_entry(self) -> Value {
        let mut entry = Map::new();
        entry.insert("id".to_string(), Value::String(self.key));
        match self.data {
            Value::Object(fields) => entry.extend(fields),
            other => {
                entry.insert("value".to_string(), other);
            }
        }
        Value::Object(entry)
    }
}
