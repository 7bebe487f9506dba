//! Browse pipeline: filter, restrict to the viewer's own posts, sort.
//!
//! Pure over `(items, filter, view, current user)` so any presentation layer
//! can render the outcome.

pub mod filter;

pub use filter::ItemFilter;

use serde::{Deserialize, Serialize};

use crate::item::Item;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Browse,
    MyPosts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseOutcome {
    /// Nothing has been posted at all.
    Empty,
    /// Items exist but none survive the filters.
    NoMatches,
    Items(Vec<Item>),
}

impl BrowseOutcome {
    /// Placeholder text for the empty states.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            BrowseOutcome::Empty => Some("No items found. Be the first to post!"),
            BrowseOutcome::NoMatches => Some("No items match your filters."),
            BrowseOutcome::Items(_) => None,
        }
    }

    pub fn items(&self) -> &[Item] {
        match self {
            BrowseOutcome::Items(items) => items,
            _ => &[],
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        match self {
            BrowseOutcome::Items(items) => items,
            _ => Vec::new(),
        }
    }
}

/// Apply the filters (AND), restrict to `current_user`'s postings in the
/// my-posts view, then sort newest first.
///
/// In the my-posts view with no signed-in user nothing matches.
pub fn browse(
    items: Vec<Item>,
    filter: &ItemFilter,
    view: View,
    current_user: Option<&str>,
) -> BrowseOutcome {
    if items.is_empty() {
        return BrowseOutcome::Empty;
    }

    let mut visible: Vec<Item> = items
        .into_iter()
        .filter(|item| filter.matches(item))
        .filter(|item| match view {
            View::Browse => true,
            View::MyPosts => current_user.is_some_and(|user| item.is_owned_by(user)),
        })
        .collect();

    visible.sort_by(|a, b| b.date.cmp(&a.date));

    if visible.is_empty() {
        BrowseOutcome::NoMatches
    } else {
        BrowseOutcome::Items(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemStatus, ItemType, NewItem};
    use chrono::{Duration, TimeZone, Utc};

    fn post(name: &str, kind: ItemType, category: &str, email: &str, minutes: i64) -> Item {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes);
        Item::create(
            NewItem {
                name: name.into(),
                kind,
                category: category.into(),
                description: format!("{name} description"),
                location: "Quad".into(),
                contact_email: email.into(),
                image: None,
            },
            at,
        )
        .unwrap()
    }

    fn names(outcome: &BrowseOutcome) -> Vec<&str> {
        outcome.items().iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn empty_collection_differs_from_no_matches() {
        let outcome = browse(Vec::new(), &ItemFilter::default(), View::Browse, None);
        assert_eq!(outcome, BrowseOutcome::Empty);
        assert_eq!(
            outcome.empty_message(),
            Some("No items found. Be the first to post!")
        );

        let items = vec![post("A", ItemType::Lost, "Electronics", "a@x", 0)];
        let filter = ItemFilter {
            category: Some("Books".into()),
            ..Default::default()
        };
        let outcome = browse(items, &filter, View::Browse, None);
        assert_eq!(outcome, BrowseOutcome::NoMatches);
        assert_eq!(outcome.empty_message(), Some("No items match your filters."));
    }

    #[test]
    fn unset_filters_return_everything_newest_first() {
        let items = vec![
            post("old", ItemType::Lost, "Keys", "a@x", 0),
            post("new", ItemType::Found, "Bags", "b@x", 30),
            post("mid", ItemType::Lost, "Books", "c@x", 10),
        ];
        let outcome = browse(items, &ItemFilter::default(), View::Browse, None);
        assert_eq!(names(&outcome), ["new", "mid", "old"]);
    }

    #[test]
    fn type_and_category_filters() {
        let items = vec![
            post("A", ItemType::Lost, "Electronics", "a@x", 0),
            post("B", ItemType::Found, "Electronics", "b@x", 5),
        ];

        let lost = ItemFilter {
            kind: Some(ItemType::Lost),
            ..Default::default()
        };
        assert_eq!(names(&browse(items.clone(), &lost, View::Browse, None)), ["A"]);

        let electronics = ItemFilter {
            category: Some("Electronics".into()),
            ..Default::default()
        };
        assert_eq!(
            names(&browse(items, &electronics, View::Browse, None)),
            ["B", "A"]
        );
    }

    #[test]
    fn my_posts_restricts_to_owner() {
        let items = vec![
            post("mine", ItemType::Lost, "Keys", "me@x", 0),
            post("theirs", ItemType::Lost, "Keys", "you@x", 1),
        ];
        let filter = ItemFilter::default();
        assert_eq!(
            names(&browse(items.clone(), &filter, View::MyPosts, Some("me@x"))),
            ["mine"]
        );
        assert_eq!(
            browse(items, &filter, View::MyPosts, None),
            BrowseOutcome::NoMatches
        );
    }

    #[test]
    fn status_filter_combines_with_search() {
        let mut claimed = post("Red bike", ItemType::Found, "Vehicles", "a@x", 0);
        claimed.status = ItemStatus::Claimed;
        let items = vec![claimed, post("Red scarf", ItemType::Found, "Clothing", "b@x", 1)];
        let filter = ItemFilter {
            search: Some("RED".into()),
            status: Some(ItemStatus::Unclaimed),
            ..Default::default()
        };
        assert_eq!(names(&browse(items, &filter, View::Browse, None)), ["Red scarf"]);
    }
}
