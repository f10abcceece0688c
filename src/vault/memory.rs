use crate::error::StoreError;
use crate::vault::records::{Folder, Item, ItemPatch, NewItem, RecordsStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

const FOLDERS: &str = "folders";
const ITEMS: &str = "items";

/// In-process records store with the same owner scoping as the hosted one
#[derive(Debug, Default)]
pub struct MemoryStore {
    folders: RwLock<HashMap<Uuid, Folder>>,
    items: RwLock<HashMap<Uuid, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordsStore for MemoryStore {
    async fn create_folder(&self, owner_id: &str, name: &str) -> Result<Folder, StoreError> {
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.folders.write().await.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn list_folders(&self, owner_id: &str) -> Result<Vec<Folder>, StoreError> {
        let mut folders: Vec<Folder> = self
            .folders
            .read()
            .await
            .values()
            .filter(|folder| folder.owner_id == owner_id)
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(folders)
    }

    async fn delete_folder(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError> {
        {
            let mut folders = self.folders.write().await;
            let owned = folders
                .get(&id)
                .is_some_and(|folder| folder.owner_id == owner_id);
            if !owned {
                return Err(StoreError::NotFound { table: FOLDERS, id });
            }
            folders.remove(&id);
        }

        let now = Utc::now();
        for item in self.items.write().await.values_mut() {
            if item.owner_id == owner_id && item.folder_id == Some(id) {
                item.folder_id = None;
                item.updated_at = now;
            }
        }
        Ok(())
    }

    async fn create_item(&self, owner_id: &str, new: NewItem) -> Result<Item, StoreError> {
        if let Some(folder_id) = new.folder_id {
            let folders = self.folders.read().await;
            if !folders
                .get(&folder_id)
                .is_some_and(|folder| folder.owner_id == owner_id)
            {
                return Err(StoreError::NotFound {
                    table: FOLDERS,
                    id: folder_id,
                });
            }
        }

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            folder_id: new.folder_id,
            kind: new.kind,
            title: new.title,
            url: new.url,
            content: new.content,
            preview: None,
            created_at: now,
            updated_at: now,
        };
        self.items.write().await.insert(item.id, item.clone());
        Ok(item)
    }

    async fn get_item(&self, owner_id: &str, id: Uuid) -> Result<Item, StoreError> {
        self.items
            .read()
            .await
            .get(&id)
            .filter(|item| item.owner_id == owner_id)
            .cloned()
            .ok_or(StoreError::NotFound { table: ITEMS, id })
    }

    async fn list_items(
        &self,
        owner_id: &str,
        folder_id: Option<Uuid>,
    ) -> Result<Vec<Item>, StoreError> {
        let mut items: Vec<Item> = self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.owner_id == owner_id)
            .filter(|item| folder_id.is_none() || item.folder_id == folder_id)
            .cloned()
            .collect();
        // Newest first
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update_item(
        &self,
        owner_id: &str,
        id: Uuid,
        patch: ItemPatch,
    ) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .filter(|item| item.owner_id == owner_id)
            .ok_or(StoreError::NotFound { table: ITEMS, id })?;
        patch.apply(item);
        Ok(item.clone())
    }

    async fn delete_item(&self, owner_id: &str, id: Uuid) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let owned = items.get(&id).is_some_and(|item| item.owner_id == owner_id);
        if !owned {
            return Err(StoreError::NotFound { table: ITEMS, id });
        }
        items.remove(&id);
        Ok(())
    }
}
