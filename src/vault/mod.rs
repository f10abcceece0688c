//! Owner-scoped records and sessions consumed by the preview data hooks.
//!
//! The hosted backend enforces ownership server side. [`MemoryStore`] and
//! [`MemorySessions`] reproduce that contract in process.

mod memory;
mod records;
mod session;

pub use memory::MemoryStore;
pub use records::{Folder, Item, ItemKind, ItemPatch, NewItem, RecordsStore};
pub use session::{MemorySessions, Session, SessionProvider};

use crate::error::StoreError;
use crate::LinkPreviewer;
use log::debug;
use uuid::Uuid;

/// Fetch a preview for a link item and store it on the item.
///
/// An empty item title is filled from the preview title. Degraded previews
/// are stored too: they still carry the domain and normalized URL.
pub async fn attach_link_preview(
    store: &dyn RecordsStore,
    sessions: &dyn SessionProvider,
    previewer: &LinkPreviewer,
    item_id: Uuid,
) -> Result<Item, StoreError> {
    let session = sessions
        .current_session()
        .await
        .ok_or(StoreError::Unauthenticated)?;
    let item = store.get_item(&session.user_id, item_id).await?;

    if item.kind != ItemKind::Link {
        return Err(StoreError::InvalidItem(format!(
            "item {} is a {:?}, not a link",
            item.id, item.kind
        )));
    }
    let url = item
        .url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| StoreError::InvalidItem(format!("item {} has no url", item.id)))?;

    let preview = previewer.preview(url).await?;
    debug!("Attaching preview for {} to item {}", preview.url, item.id);

    let title = if item.title.trim().is_empty() {
        preview.title.clone()
    } else {
        None
    };
    let patch = ItemPatch {
        title,
        preview: Some(preview),
        ..ItemPatch::default()
    };
    store.update_item(&session.user_id, item.id, patch).await
}
