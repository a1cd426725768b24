use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::model::{GroupBuy, Notification};
use crate::domain::ports::{SnapshotStore, Storage};
use crate::utils::error::{GroupBuyError, Result};

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_GROUPS_KEY: &str = "marketplace-groups";
pub const DEFAULT_NOTIFICATIONS_KEY: &str = "marketplace-notifications";

/// On-disk envelope: `{"state": {...}, "version": 1}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedDocument<T> {
    pub state: T,
    pub version: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupsState {
    pub groups: Vec<GroupBuy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsState {
    pub notifications: Vec<Notification>,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

/// Decode a stored document. Documents written under another schema version
/// are dropped (`Ok(None)`); unreadable JSON is an error.
pub fn decode_document<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<Option<T>> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| GroupBuyError::SnapshotError {
            message: format!("{}: {}", key, e),
        })?;

    match probe.version {
        Some(SCHEMA_VERSION) => {}
        other => {
            tracing::warn!(
                "⚠️ Discarding '{}' snapshot with unsupported version {:?} (expected {})",
                key,
                other,
                SCHEMA_VERSION
            );
            return Ok(None);
        }
    }

    let document: PersistedDocument<T> =
        serde_json::from_slice(bytes).map_err(|e| GroupBuyError::SnapshotError {
            message: format!("{}: {}", key, e),
        })?;
    Ok(Some(document.state))
}

pub fn encode_document<T: Serialize>(state: T) -> Result<Vec<u8>> {
    let document = PersistedDocument {
        state,
        version: SCHEMA_VERSION,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Snapshot store writing one JSON document per collection through a
/// [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore<S: Storage> {
    storage: S,
    groups_key: String,
    notifications_key: String,
}

impl<S: Storage> JsonSnapshotStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_keys(storage, DEFAULT_GROUPS_KEY, DEFAULT_NOTIFICATIONS_KEY)
    }

    pub fn with_keys(storage: S, groups_key: &str, notifications_key: &str) -> Self {
        Self {
            storage,
            groups_key: groups_key.to_string(),
            notifications_key: notifications_key.to_string(),
        }
    }

    fn file_name(key: &str) -> String {
        format!("{}.json", key)
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let file = Self::file_name(key);
        let Some(bytes) = self.storage.read_file(&file).await? else {
            tracing::debug!("No snapshot stored under '{}'", file);
            return Ok(None);
        };
        decode_document(key, &bytes)
    }
}

#[async_trait]
impl<S: Storage> SnapshotStore for JsonSnapshotStore<S> {
    async fn load_groups(&self) -> Result<Option<Vec<GroupBuy>>> {
        let state: Option<GroupsState> = self.load(&self.groups_key).await?;
        Ok(state.map(|s| s.groups))
    }

    async fn save_groups(&self, groups: &[GroupBuy]) -> Result<()> {
        let bytes = encode_document(GroupsState {
            groups: groups.to_vec(),
        })?;
        self.storage
            .write_file(&Self::file_name(&self.groups_key), &bytes)
            .await?;
        tracing::debug!("Saved {} group buys", groups.len());
        Ok(())
    }

    async fn load_notifications(&self) -> Result<Option<Vec<Notification>>> {
        let state: Option<NotificationsState> = self.load(&self.notifications_key).await?;
        Ok(state.map(|s| s.notifications))
    }

    async fn save_notifications(&self, notifications: &[Notification]) -> Result<()> {
        let bytes = encode_document(NotificationsState {
            notifications: notifications.to_vec(),
        })?;
        self.storage
            .write_file(&Self::file_name(&self.notifications_key), &bytes)
            .await?;
        tracing::debug!("Saved {} notifications", notifications.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::demo_groups;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[derive(Default, Clone)]
    struct MemoryStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MemoryStorage {
        async fn read_file(&self, path: &str) -> Result<Option<Vec<u8>>> {
            Ok(self.files.lock().get(path).cloned())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_groups_survive_save_and_load() {
        let storage = MemoryStorage::default();
        let store = JsonSnapshotStore::new(storage.clone());
        let groups = demo_groups();

        tokio_test::block_on(store.save_groups(&groups)).unwrap();
        let loaded = tokio_test::block_on(store.load_groups()).unwrap().unwrap();
        assert_eq!(loaded, groups);

        let raw = storage.files.lock().get("marketplace-groups.json").cloned().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["state"]["groups"][0]["organizerId"], "vendor1");
        assert_eq!(json["state"]["groups"][0]["status"], "active");
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let store = JsonSnapshotStore::new(MemoryStorage::default());
        assert!(tokio_test::block_on(store.load_groups()).unwrap().is_none());
        assert!(tokio_test::block_on(store.load_notifications()).unwrap().is_none());
    }

    #[test]
    fn test_unknown_version_is_discarded() {
        let bytes = br#"{"state": {"groups": []}, "version": 7}"#;
        let state: Option<GroupsState> = decode_document("marketplace-groups", bytes).unwrap();
        assert!(state.is_none());

        let unversioned = br#"{"state": {"groups": []}}"#;
        let state: Option<GroupsState> = decode_document("marketplace-groups", unversioned).unwrap();
        assert!(state.is_none());
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let result: Result<Option<GroupsState>> = decode_document("marketplace-groups", b"{not json");
        assert!(matches!(result, Err(GroupBuyError::SnapshotError { .. })));

        let wrong_shape = br#"{"state": {"groups": [{"id": 1}]}, "version": 1}"#;
        let result: Result<Option<GroupsState>> = decode_document("marketplace-groups", wrong_shape);
        assert!(matches!(result, Err(GroupBuyError::SnapshotError { .. })));
    }
}
