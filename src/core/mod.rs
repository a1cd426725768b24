pub mod notifications;
pub mod progress;
pub mod registry;
pub mod seed;
pub mod service;
pub mod shared;
pub mod snapshot;
pub mod stats;

pub use crate::domain::model::{GroupBuy, GroupBuyPatch, GroupStatus, NewGroupBuy};
pub use crate::domain::ports::{ConfigProvider, NotificationSink, SnapshotStore, Storage};
pub use crate::utils::error::Result;
