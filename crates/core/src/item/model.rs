use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::DocumentKey;

/// Rule violations when building or mutating an item.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("image must be a data URI")]
    InvalidImage,
    #[error("only the owner can change the status of this item")]
    NotOwner,
    #[error("message text cannot be empty")]
    EmptyMessage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Lost => "lost",
            ItemType::Found => "found",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Unclaimed,
    Claimed,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Unclaimed => "unclaimed",
            ItemStatus::Claimed => "claimed",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ItemStatus::Unclaimed => ItemStatus::Claimed,
            ItemStatus::Claimed => ItemStatus::Unclaimed,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message left on an item by another user. Embedded, append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// A lost/found posting, stored as one JSON document under its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub category: String,
    pub description: String,
    pub location: String,
    pub contact_email: String,
    /// Embedded image as a `data:` URI.
    #[serde(default)]
    pub image: Option<String>,
    pub status: ItemStatus,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Fields submitted by the post form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemType,
    pub category: String,
    pub description: String,
    pub location: String,
    pub contact_email: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), ItemError> {
        let required = [
            ("name", &self.name),
            ("category", &self.category),
            ("location", &self.location),
            ("contactEmail", &self.contact_email),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ItemError::MissingField(field));
            }
        }
        match &self.image {
            Some(uri) if !uri.starts_with("data:") => Err(ItemError::InvalidImage),
            _ => Ok(()),
        }
    }
}

impl Item {
    /// Build a fresh, unclaimed item with an `item_<millis>` id.
    pub fn create(new: NewItem, at: DateTime<Utc>) -> Result<Self, ItemError> {
        new.validate()?;
        Ok(Self {
            id: DocumentKey::new_item(at).full_key(),
            name: new.name,
            kind: new.kind,
            category: new.category,
            description: new.description,
            location: new.location,
            contact_email: new.contact_email,
            image: new.image,
            status: ItemStatus::Unclaimed,
            date: at,
            messages: Vec::new(),
        })
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.contact_email == email
    }

    /// Flip between claimed and unclaimed. Only the owner may do this.
    pub fn toggle_status(&mut self, actor: &str) -> Result<ItemStatus, ItemError> {
        if !self.is_owned_by(actor) {
            return Err(ItemError::NotOwner);
        }
        self.status = self.status.toggled();
        Ok(self.status)
    }

    pub fn append_message(
        &mut self,
        sender: &str,
        text: &str,
        at: DateTime<Utc>,
    ) -> Result<&Message, ItemError> {
        if text.trim().is_empty() {
            return Err(ItemError::EmptyMessage);
        }
        self.messages.push(Message {
            sender: sender.to_string(),
            text: text.to_string(),
            date: at,
        });
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Decode listing entries into items, skipping documents that do not have
/// the item shape.
pub fn items_from_documents(documents: Vec<Value>) -> Vec<Item> {
    documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<Item>(doc) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!("skipping malformed item document: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn new_item() -> NewItem {
        NewItem {
            name: "Blue backpack".into(),
            kind: ItemType::Lost,
            category: "Bags".into(),
            description: "Left in the library".into(),
            location: "Library 2F".into(),
            contact_email: "ana@campus.edu".into(),
            image: None,
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn create_sets_defaults() {
        let item = Item::create(new_item(), at()).unwrap();
        assert_eq!(item.id, format!("item_{}", at().timestamp_millis()));
        assert_eq!(item.status, ItemStatus::Unclaimed);
        assert!(item.messages.is_empty());
        assert_eq!(item.date, at());
    }

    #[test]
    fn create_rejects_blank_name_and_non_data_image() {
        let mut blank = new_item();
        blank.name = " ".into();
        assert_eq!(
            Item::create(blank, at()),
            Err(ItemError::MissingField("name"))
        );

        let mut linked = new_item();
        linked.image = Some("https://example.com/a.png".into());
        assert_eq!(Item::create(linked, at()), Err(ItemError::InvalidImage));
    }

    #[test]
    fn toggle_twice_restores_status() {
        let mut item = Item::create(new_item(), at()).unwrap();
        assert_eq!(item.toggle_status("ana@campus.edu"), Ok(ItemStatus::Claimed));
        assert_eq!(
            item.toggle_status("ana@campus.edu"),
            Ok(ItemStatus::Unclaimed)
        );
    }

    #[test]
    fn toggle_by_stranger_is_rejected() {
        let mut item = Item::create(new_item(), at()).unwrap();
        assert_eq!(item.toggle_status("bo@campus.edu"), Err(ItemError::NotOwner));
        assert_eq!(item.status, ItemStatus::Unclaimed);
    }

    #[test]
    fn messages_keep_insertion_order() {
        let mut item = Item::create(new_item(), at()).unwrap();
        item.append_message("bo@campus.edu", "I found it", at()).unwrap();
        item.append_message("ana@campus.edu", "Thanks!", at()).unwrap();
        assert_eq!(item.append_message("bo@campus.edu", "  ", at()).err(), Some(ItemError::EmptyMessage));
        let texts: Vec<_> = item.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["I found it", "Thanks!"]);
    }

    #[test]
    fn decodes_wire_shape() {
        let doc = json!({
            "id": "item_1",
            "name": "Keys",
            "type": "found",
            "category": "Keys",
            "description": "",
            "location": "Gym",
            "contactEmail": "x@campus.edu",
            "image": null,
            "status": "claimed",
            "date": "2024-03-01T12:00:00.000Z"
        });
        let item: Item = serde_json::from_value(doc).unwrap();
        assert_eq!(item.kind, ItemType::Found);
        assert_eq!(item.status, ItemStatus::Claimed);
        assert!(item.messages.is_empty());
    }

    #[test]
    fn malformed_documents_are_skipped() {
        let good = Item::create(new_item(), at()).unwrap();
        let docs = vec![json!({"id": "item_bad"}), good.to_document().unwrap()];
        assert_eq!(items_from_documents(docs), vec![good]);
    }
}
