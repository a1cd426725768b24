pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::app::MarketplaceSession;
pub use crate::core::{
    notifications::NotificationCenter,
    registry::{DeleteOutcome, GroupBuyRegistry, JoinOutcome, LeaveOutcome, UpdateOutcome},
    service::GroupBuyService,
    shared::SharedRegistry,
    snapshot::JsonSnapshotStore,
    stats::{RegistryStats, UserGroupSummary},
};
pub use crate::domain::model::{
    GroupBuy, GroupBuyPatch, GroupStatus, NewGroupBuy, NewNotification, Notification,
    NotificationKind,
};
pub use crate::domain::policy::{RegistryPolicy, UpdatePolicy};
pub use crate::utils::error::{GroupBuyError, Result};
