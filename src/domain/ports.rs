use crate::domain::model::{GroupBuy, NewNotification, Notification};
use crate::domain::policy::RegistryPolicy;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Raw key/value blob storage. Keys are relative names such as
/// `marketplace-groups.json`.
pub trait Storage: Send + Sync {
    fn read_file(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Typed snapshot/restore of the persisted collections. `None` means
/// nothing usable was stored.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn load_groups(&self) -> Result<Option<Vec<GroupBuy>>>;
    async fn save_groups(&self, groups: &[GroupBuy]) -> Result<()>;
    async fn load_notifications(&self) -> Result<Option<Vec<Notification>>>;
    async fn save_notifications(&self, notifications: &[Notification]) -> Result<()>;
}

/// Receives events emitted by the group-buy service layer.
pub trait NotificationSink {
    fn notify(&mut self, notification: NewNotification);
}

impl NotificationSink for Vec<NewNotification> {
    fn notify(&mut self, notification: NewNotification) {
        self.push(notification);
    }
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn groups_key(&self) -> &str;
    fn notifications_key(&self) -> &str;
    fn registry_policy(&self) -> RegistryPolicy;
    fn seed_demo_data(&self) -> bool;
}
