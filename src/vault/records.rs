use crate::error::StoreError;
use crate::model::PreviewResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Link,
    Image,
    Video,
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub owner_id: String,
    pub folder_id: Option<Uuid>,
    pub kind: ItemKind,
    pub title: String,
    pub url: Option<String>,
    /// Body text for notes
    pub content: Option<String>,
    /// Link preview captured for this item, if any
    pub preview: Option<PreviewResult>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when creating an item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub folder_id: Option<Uuid>,
    pub kind: ItemKind,
    pub title: String,
    pub url: Option<String>,
    pub content: Option<String>,
}

impl NewItem {
    pub fn link(url: impl Into<String>) -> Self {
        Self {
            folder_id: None,
            kind: ItemKind::Link,
            title: String::new(),
            url: Some(url.into()),
            content: None,
        }
    }

    pub fn note(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            folder_id: None,
            kind: ItemKind::Note,
            title: title.into(),
            url: None,
            content: Some(content.into()),
        }
    }

    pub fn in_folder(mut self, folder_id: Uuid) -> Self {
        self.folder_id = Some(folder_id);
        self
    }
}

/// Partial update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub folder_id: Option<Option<Uuid>>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub preview: Option<PreviewResult>,
}

impl ItemPatch {
    pub(crate) fn apply(self, item: &mut Item) {
        if let Some(folder_id) = self.folder_id {
            item.folder_id = folder_id;
        }
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(url) = self.url {
            item.url = Some(url);
        }
        if let Some(content) = self.content {
            item.content = Some(content);
        }
        if let Some(preview) = self.preview {
            item.preview = Some(preview);
        }
        item.updated_at = Utc::now();
    }
}

/// Owner-scoped persistence for folders and items.
///
/// Every call names the owner it acts for. Records belonging to anyone else
/// behave exactly like missing records.
#[async_trait]
pub trait RecordsStore: Send + Sync {
    async fn create_folder(&self, owner_id: &str, name: &str) -> Result<Folder, StoreError>;

    async fn list_folders(&self, owner_id: &str) -> Result<Vec<Folder>, StoreError>;

    /// Delete a folder. Its items are kept and moved out of it.
    async fn delete_folder(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError>;

    async fn create_item(&self, owner_id: &str, item: NewItem) -> Result<Item, StoreError>;

    async fn get_item(&self, owner_id: &str, id: Uuid) -> Result<Item, StoreError>;

    /// Items in `folder_id`, or every item of the owner when `None`
    async fn list_items(
        &self,
        owner_id: &str,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<Item>, StoreError>;

    async fn update_item(
        &self,
        owner_id: &str,
        id: Uuid,
        patch: ItemPatch,
    ) -> Result<Item, StoreError>;

    async fn delete_item(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError>;
}
