use chrono::{Duration, Utc};
use lostfound_core::{browse, BrowseOutcome, Item, ItemStatus, Message, NewItem};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::repository::{ItemRepository, UpsertReceipt, Versioned};
use crate::session::AppSession;

/// How many consecutive millisecond ids a post tries before giving up.
const MAX_CREATE_ATTEMPTS: i64 = 100;

/// An item plus what the current viewer may do with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub item: Item,
    /// Owners can mark their item claimed/unclaimed.
    pub can_toggle_status: bool,
    /// Signed-in non-owners can contact the owner.
    pub can_message: bool,
}

/// Operations behind the public board.
#[derive(Debug, Clone)]
pub struct BoardClient {
    repo: ItemRepository,
}

impl BoardClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            repo: ItemRepository::new(config)?,
        })
    }

    pub fn repository(&self) -> &ItemRepository {
        &self.repo
    }

    /// Fetch everything and run the browse pipeline with the session's
    /// view and filters.
    pub async fn load(&self, session: &AppSession) -> BrowseOutcome {
        let items = self.repo.fetch_items().await;
        browse(items, session.filter(), session.view(), session.user_email())
    }

    /// Post a new item. The contact email becomes the session identity.
    ///
    /// Ids are millisecond timestamps, so a post that lands on a taken id
    /// moves to the next free millisecond instead of overwriting.
    pub async fn post_item(&self, session: &mut AppSession, new: NewItem) -> ClientResult<Item> {
        session.require_user()?;
        let now = Utc::now();

        for attempt in 0..MAX_CREATE_ATTEMPTS {
            let item = Item::create(new.clone(), now + Duration::milliseconds(attempt))?;
            match self.repo.create(&item.id, &item.to_document()?).await {
                Ok(_) => {
                    session.remember_email(&item.contact_email);
                    tracing::info!(id = %item.id, "item posted");
                    return Ok(item);
                }
                Err(ClientError::Conflict(_)) => {
                    tracing::debug!(id = %item.id, "item id taken, trying the next one");
                }
                Err(err) => return Err(err),
            }
        }

        Err(ClientError::Conflict("new item id".to_string()))
    }

    pub async fn item_details(&self, session: &AppSession, id: &str) -> Option<ItemDetails> {
        let item = self.fetch_item(id).await?.document;
        let is_owner = session.user_email().is_some_and(|me| item.is_owned_by(me));
        Some(ItemDetails {
            can_toggle_status: is_owner,
            can_message: session.is_authenticated() && !is_owner,
            item,
        })
    }

    /// Owner-only claimed/unclaimed flip. Fails with `Conflict` if the item
    /// changed since it was read.
    pub async fn toggle_status(&self, session: &AppSession, id: &str) -> ClientResult<ItemStatus> {
        let me = session.require_user()?;
        let Versioned {
            document: mut item,
            revision,
        } = self
            .fetch_item(id)
            .await
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

        let status = item.toggle_status(me)?;
        self.save(&item, revision.as_deref()).await?;
        Ok(status)
    }

    /// Append a message from the signed-in user to the item's thread.
    pub async fn send_message(
        &self,
        session: &AppSession,
        id: &str,
        text: &str,
    ) -> ClientResult<Message> {
        let me = session.require_user()?;
        let Versioned {
            document: mut item,
            revision,
        } = self
            .fetch_item(id)
            .await
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

        let message = item.append_message(me, text, Utc::now())?.clone();
        self.save(&item, revision.as_deref()).await?;
        Ok(message)
    }

    /// The message thread in the order it was written.
    pub async fn messages(&self, id: &str) -> Vec<Message> {
        self.fetch_item(id)
            .await
            .map(|found| found.document.messages)
            .unwrap_or_default()
    }

    async fn fetch_item(&self, id: &str) -> Option<Versioned<Item>> {
        let Versioned { document, revision } = self.repo.fetch_versioned(id).await?;
        match serde_json::from_value::<Item>(document) {
            Ok(item) => Some(Versioned {
                document: item,
                revision,
            }),
            Err(err) => {
                tracing::warn!(%id, "stored document is not an item: {err}");
                None
            }
        }
    }

    async fn save(&self, item: &Item, revision: Option<&str>) -> ClientResult<UpsertReceipt> {
        self.repo
            .upsert_if(&item.id, &item.to_document()?, revision)
            .await
    }
}
