use crate::core::registry::{DeleteOutcome, GroupBuyRegistry, JoinOutcome, LeaveOutcome, UpdateOutcome};
use crate::domain::model::{GroupBuy, GroupBuyPatch, NewGroupBuy, NewNotification, NotificationKind};
use crate::domain::ports::NotificationSink;
use crate::utils::error::{GroupBuyError, Result};

pub const GROUPS_ACTION_URL: &str = "/groups";

/// The layer the views talk to: gates actions the way the UI does and tells
/// organizers when their membership changes. The registry itself emits
/// nothing.
pub struct GroupBuyService<N: NotificationSink> {
    registry: GroupBuyRegistry,
    sink: N,
}

impl<N: NotificationSink> GroupBuyService<N> {
    pub fn new(registry: GroupBuyRegistry, sink: N) -> Self {
        Self { registry, sink }
    }

    pub fn registry(&self) -> &GroupBuyRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    pub fn find(&self, group_id: &str) -> Result<&GroupBuy> {
        self.registry.get(group_id).ok_or_else(|| GroupBuyError::NotFound {
            id: group_id.to_string(),
        })
    }

    pub fn create(&mut self, input: NewGroupBuy) -> Result<GroupBuy> {
        self.registry.create(input)
    }

    /// Capacity follows the registry's `enforce_capacity` policy.
    pub fn join(&mut self, group_id: &str, user_id: &str, contribution: f64) -> Result<JoinOutcome> {
        let outcome = self.registry.join(group_id, user_id, contribution)?;
        if outcome == JoinOutcome::GroupFull {
            tracing::warn!(group_id, user_id, "⚠️ Group is full, join refused");
        }
        if outcome.is_applied() {
            self.notify_organizer(
                group_id,
                user_id,
                "New member joined your group",
                |title| format!("{} joined \"{}\" with a contribution of {:.2}", user_id, title, contribution),
            );
        }
        Ok(outcome)
    }

    pub fn leave(&mut self, group_id: &str, user_id: &str) -> Result<LeaveOutcome> {
        let outcome = self.registry.leave(group_id, user_id)?;
        if outcome.is_applied() {
            self.notify_organizer(group_id, user_id, "A member left your group", |title| {
                format!("{} left \"{}\"", user_id, title)
            });
        }
        Ok(outcome)
    }

    pub fn delete(&mut self, group_id: &str, user_id: &str) -> DeleteOutcome {
        if self.registry.get(group_id).is_none() {
            return DeleteOutcome::NotFound;
        }
        if !self.registry.can_delete(group_id, user_id) {
            tracing::warn!(group_id, user_id, "Delete refused: not the organizer");
            return DeleteOutcome::NotOrganizer;
        }
        self.registry.delete(group_id, user_id)
    }

    pub fn update(&mut self, group_id: &str, actor_id: &str, patch: GroupBuyPatch) -> Result<UpdateOutcome> {
        self.registry.update(group_id, actor_id, patch)
    }

    fn notify_organizer(
        &mut self,
        group_id: &str,
        user_id: &str,
        title: &str,
        message: impl FnOnce(&str) -> String,
    ) {
        let Some(group) = self.registry.get(group_id) else {
            return;
        };
        if group.is_organizer(user_id) {
            return;
        }
        let notification = NewNotification {
            user_id: group.organizer_id.clone(),
            title: title.to_string(),
            message: message(&group.title),
            kind: NotificationKind::Group,
            read: false,
            action_url: Some(GROUPS_ACTION_URL.to_string()),
        };
        self.sink.notify(notification);
    }
}
