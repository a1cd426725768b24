use crate::core::notifications::NotificationCenter;
use crate::core::registry::GroupBuyRegistry;
use crate::core::seed::demo_groups;
use crate::core::service::GroupBuyService;
use crate::core::{ConfigProvider, SnapshotStore};
use crate::domain::policy::RegistryPolicy;
use crate::utils::error::Result;

/// One unit of work against the persisted marketplace: restore the
/// snapshots, run operations through the service, write them back.
pub struct MarketplaceSession<S: SnapshotStore> {
    store: S,
    policy: RegistryPolicy,
    service: GroupBuyService<NotificationCenter>,
}

impl<S: SnapshotStore> MarketplaceSession<S> {
    pub async fn open<C: ConfigProvider>(store: S, config: &C) -> Result<Self> {
        let policy = config.registry_policy();

        let groups = match store.load_groups().await? {
            Some(groups) => {
                tracing::debug!("Restored {} group buys", groups.len());
                groups
            }
            None if config.seed_demo_data() => {
                tracing::info!("🌱 No saved groups, starting from demo data");
                demo_groups()
            }
            None => Vec::new(),
        };
        let notifications = store.load_notifications().await?.unwrap_or_default();

        let service = GroupBuyService::new(
            GroupBuyRegistry::restore(groups, policy)?,
            NotificationCenter::with_notifications(notifications),
        );

        Ok(Self {
            store,
            policy,
            service,
        })
    }

    pub fn service(&self) -> &GroupBuyService<NotificationCenter> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut GroupBuyService<NotificationCenter> {
        &mut self.service
    }

    pub fn registry(&self) -> &GroupBuyRegistry {
        self.service.registry()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        self.service.sink()
    }

    /// Notification edits (read flags, deletes) go straight to the center;
    /// only group events are routed through the service.
    pub fn notifications_mut(&mut self) -> &mut NotificationCenter {
        self.service.sink_mut()
    }

    /// Replace every group with the demo data. Notifications are kept.
    pub fn reset_to_demo(&mut self) {
        let center = std::mem::take(self.service.sink_mut());
        self.service = GroupBuyService::new(
            GroupBuyRegistry::with_groups(demo_groups(), self.policy),
            center,
        );
    }

    pub async fn save(&self) -> Result<()> {
        self.store.save_groups(self.registry().groups()).await?;
        self.store
            .save_notifications(self.notifications().notifications())
            .await?;
        tracing::debug!("💾 Snapshots saved");
        Ok(())
    }
}
