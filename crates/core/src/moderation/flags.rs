use std::collections::HashMap;

use crate::flag::{Flag, FlaggedItem};
use crate::item::Item;

/// Join flags with the items they reference, in flag order.
///
/// Flags whose item no longer exists are dropped here rather than
/// treated as errors.
pub fn flagged_view(flags: &[Flag], items: &[Item]) -> Vec<FlaggedItem> {
    let by_id: HashMap<&str, &Item> = items.iter().map(|i| (i.id.as_str(), i)).collect();

    flags
        .iter()
        .filter_map(|flag| {
            by_id.get(flag.item_id.as_str()).map(|item| FlaggedItem {
                item: (*item).clone(),
                flag_reason: flag.reason.clone(),
                flag_date: flag.date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemType, NewItem};
    use chrono::Utc;

    fn item(name: &str) -> Item {
        let mut item = Item::create(
            NewItem {
                name: name.into(),
                kind: ItemType::Lost,
                category: "Misc".into(),
                description: String::new(),
                location: "Hall".into(),
                contact_email: "o@campus.edu".into(),
                image: None,
            },
            Utc::now(),
        )
        .unwrap();
        item.id = format!("item_{name}");
        item
    }

    #[test]
    fn orphan_flags_are_dropped() {
        let items = vec![item("a")];
        let flags = vec![
            Flag::new("item_a", "spam", Utc::now()).unwrap(),
            Flag::new("item_gone", "duplicate", Utc::now()).unwrap(),
        ];
        let view = flagged_view(&flags, &items);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].item.id, "item_a");
        assert_eq!(view[0].flag_reason, "spam");
    }

    #[test]
    fn each_flag_yields_a_row() {
        let items = vec![item("a")];
        let flags = vec![
            Flag::new("item_a", "spam", Utc::now()).unwrap(),
            Flag::new("item_a", "offensive", Utc::now()).unwrap(),
        ];
        let reasons: Vec<_> = flagged_view(&flags, &items)
            .into_iter()
            .map(|f| f.flag_reason)
            .collect();
        assert_eq!(reasons, ["spam", "offensive"]);
    }
}
