use parking_lot::Mutex;
use std::sync::Arc;

use crate::core::registry::{DeleteOutcome, GroupBuyRegistry, JoinOutcome, LeaveOutcome, UpdateOutcome};
use crate::domain::model::{GroupBuy, GroupBuyPatch, NewGroupBuy};
use crate::utils::error::Result;

/// Cloneable handle for callers that share one registry across threads.
/// Every call holds the lock for its whole duration and reads hand back
/// owned copies.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<GroupBuyRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: GroupBuyRegistry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn create(&self, input: NewGroupBuy) -> Result<GroupBuy> {
        self.inner.lock().create(input)
    }

    pub fn join(&self, group_id: &str, user_id: &str, contribution: f64) -> Result<JoinOutcome> {
        self.inner.lock().join(group_id, user_id, contribution)
    }

    pub fn leave(&self, group_id: &str, user_id: &str) -> Result<LeaveOutcome> {
        self.inner.lock().leave(group_id, user_id)
    }

    pub fn delete(&self, group_id: &str, user_id: &str) -> DeleteOutcome {
        self.inner.lock().delete(group_id, user_id)
    }

    pub fn update(&self, group_id: &str, actor_id: &str, patch: GroupBuyPatch) -> Result<UpdateOutcome> {
        self.inner.lock().update(group_id, actor_id, patch)
    }

    pub fn get(&self, group_id: &str) -> Option<GroupBuy> {
        self.inner.lock().get(group_id).cloned()
    }

    pub fn snapshot(&self) -> Vec<GroupBuy> {
        self.inner.lock().groups().to_vec()
    }

    pub fn groups_for_user(&self, user_id: &str) -> Vec<GroupBuy> {
        self.inner
            .lock()
            .groups_for_user(user_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn active_groups(&self) -> Vec<GroupBuy> {
        self.inner.lock().active_groups().into_iter().cloned().collect()
    }

    pub fn is_member(&self, group_id: &str, user_id: &str) -> bool {
        self.inner.lock().is_member(group_id, user_id)
    }

    pub fn can_delete(&self, group_id: &str, user_id: &str) -> bool {
        self.inner.lock().can_delete(group_id, user_id)
    }
}
