use chrono::Utc;
use std::collections::HashSet;

use crate::domain::model::{new_record_id, GroupBuy, GroupBuyPatch, GroupStatus, NewGroupBuy};
use crate::domain::policy::{RegistryPolicy, UpdatePolicy};
use crate::utils::error::{GroupBuyError, Result};
use crate::utils::validation::{validate_non_negative_amount, validate_required_field, Validate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinOutcome {
    Joined { current_amount: f64 },
    AlreadyMember,
    GroupFull,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LeaveOutcome {
    Left { deducted: f64, current_amount: f64 },
    NotMember,
    /// The organizer always stays a participant.
    OrganizerCannotLeave,
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Deleted(GroupBuy),
    NotOrganizer,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotOrganizer,
    NotFound,
}

impl JoinOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, JoinOutcome::Joined { .. })
    }
}

impl LeaveOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LeaveOutcome::Left { .. })
    }
}

/// Authoritative in-memory collection of group buys.
///
/// Misuse (joining twice, leaving as a non-member, deleting someone else's
/// group) never fails: the call leaves the collection untouched and the
/// returned outcome says why. Only malformed input produces an `Err`.
#[derive(Debug, Clone, Default)]
pub struct GroupBuyRegistry {
    groups: Vec<GroupBuy>,
    policy: RegistryPolicy,
}

impl GroupBuyRegistry {
    pub fn new(policy: RegistryPolicy) -> Self {
        Self {
            groups: Vec::new(),
            policy,
        }
    }

    /// Wrap already-trusted groups (demo data, tests), keeping their order.
    pub fn with_groups(groups: Vec<GroupBuy>, policy: RegistryPolicy) -> Self {
        Self { groups, policy }
    }

    /// Like [`with_groups`](Self::with_groups), but rejects records that
    /// break the registry's invariants: a bad record or a reused id fails
    /// the whole restore with a `SnapshotError`.
    pub fn restore(groups: Vec<GroupBuy>, policy: RegistryPolicy) -> Result<Self> {
        let mut ids = HashSet::new();
        for group in &groups {
            group.validate().map_err(|e| GroupBuyError::SnapshotError {
                message: format!("group '{}' is invalid: {}", group.id, e),
            })?;
            if !ids.insert(group.id.as_str()) {
                return Err(GroupBuyError::SnapshotError {
                    message: format!("group id '{}' appears more than once", group.id),
                });
            }
        }
        Ok(Self::with_groups(groups, policy))
    }

    pub fn policy(&self) -> RegistryPolicy {
        self.policy
    }

    pub fn create(&mut self, input: NewGroupBuy) -> Result<GroupBuy> {
        input.validate()?;

        let mut id = new_record_id("group");
        while self.get(&id).is_some() {
            id = new_record_id("group");
        }

        let group = GroupBuy {
            id,
            title: input.title,
            description: input.description,
            organizer: input.organizer,
            participants: vec![input.organizer_id.clone()],
            organizer_id: input.organizer_id,
            location: input.location,
            target_amount: input.target_amount,
            current_amount: 0.0,
            max_participants: input.max_participants,
            time_left: input.time_left,
            category: input.category,
            savings: input.savings,
            status: input.status,
            created_at: Utc::now(),
            expires_at: input.expires_at,
        };

        tracing::info!(
            group_id = %group.id,
            organizer_id = %group.organizer_id,
            "Created group buy '{}'",
            group.title
        );
        self.groups.push(group.clone());
        Ok(group)
    }

    pub fn join(&mut self, group_id: &str, user_id: &str, contribution: f64) -> Result<JoinOutcome> {
        validate_required_field("user_id", user_id)?;
        validate_non_negative_amount("contribution", contribution)?;

        let enforce_capacity = self.policy.enforce_capacity;
        let Some(group) = self.get_mut(group_id) else {
            tracing::debug!(group_id, user_id, "join ignored: group not found");
            return Ok(JoinOutcome::NotFound);
        };

        if group.is_member(user_id) {
            tracing::debug!(group_id, user_id, "join ignored: already a participant");
            return Ok(JoinOutcome::AlreadyMember);
        }

        if enforce_capacity && group.is_full() {
            tracing::debug!(
                group_id,
                user_id,
                "join ignored: {}/{} participants",
                group.participants.len(),
                group.max_participants
            );
            return Ok(JoinOutcome::GroupFull);
        }

        group.participants.push(user_id.to_string());
        group.current_amount += contribution;

        tracing::info!(
            group_id,
            user_id,
            "Joined with {:.2}, pooled {:.2}/{:.2}",
            contribution,
            group.current_amount,
            group.target_amount
        );
        Ok(JoinOutcome::Joined {
            current_amount: group.current_amount,
        })
    }

    /// Removes `user_id` and deducts the group's average share, floored at
    /// zero. Individual contributions are not tracked, so the deduction is
    /// an estimate.
    pub fn leave(&mut self, group_id: &str, user_id: &str) -> Result<LeaveOutcome> {
        validate_required_field("user_id", user_id)?;

        let Some(group) = self.get_mut(group_id) else {
            tracing::debug!(group_id, user_id, "leave ignored: group not found");
            return Ok(LeaveOutcome::NotFound);
        };

        if group.is_organizer(user_id) {
            tracing::debug!(group_id, user_id, "leave ignored: organizer must stay");
            return Ok(LeaveOutcome::OrganizerCannotLeave);
        }

        if !group.is_member(user_id) {
            tracing::debug!(group_id, user_id, "leave ignored: not a participant");
            return Ok(LeaveOutcome::NotMember);
        }

        group.participants.retain(|p| p != user_id);
        let before = group.current_amount;
        group.current_amount = (before - group.average_share()).max(0.0);
        let deducted = before - group.current_amount;

        tracing::info!(
            group_id,
            user_id,
            "Left group, deducted {:.2}, pooled {:.2}",
            deducted,
            group.current_amount
        );
        Ok(LeaveOutcome::Left {
            deducted,
            current_amount: group.current_amount,
        })
    }

    pub fn delete(&mut self, group_id: &str, user_id: &str) -> DeleteOutcome {
        let Some(index) = self.groups.iter().position(|g| g.id == group_id) else {
            tracing::debug!(group_id, user_id, "delete ignored: group not found");
            return DeleteOutcome::NotFound;
        };

        if !self.groups[index].is_organizer(user_id) {
            tracing::debug!(group_id, user_id, "delete ignored: not the organizer");
            return DeleteOutcome::NotOrganizer;
        }

        let removed = self.groups.remove(index);
        tracing::info!(group_id, user_id, "Deleted group buy '{}'", removed.title);
        DeleteOutcome::Deleted(removed)
    }

    pub fn update(&mut self, group_id: &str, actor_id: &str, patch: GroupBuyPatch) -> Result<UpdateOutcome> {
        patch.validate()?;

        let update_policy = self.policy.update_policy;
        let Some(group) = self.get_mut(group_id) else {
            tracing::debug!(group_id, "update ignored: group not found");
            return Ok(UpdateOutcome::NotFound);
        };

        if update_policy == UpdatePolicy::OrganizerOnly && !group.is_organizer(actor_id) {
            tracing::debug!(group_id, actor_id, "update ignored: not the organizer");
            return Ok(UpdateOutcome::NotOrganizer);
        }

        patch.apply_to(group);
        tracing::info!(group_id, actor_id, "Updated group buy '{}'", group.title);
        Ok(UpdateOutcome::Updated)
    }

    pub fn get(&self, group_id: &str) -> Option<&GroupBuy> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    fn get_mut(&mut self, group_id: &str) -> Option<&mut GroupBuy> {
        self.groups.iter_mut().find(|g| g.id == group_id)
    }

    /// All groups in insertion order.
    pub fn groups(&self) -> &[GroupBuy] {
        &self.groups
    }

    pub fn groups_for_user(&self, user_id: &str) -> Vec<&GroupBuy> {
        self.groups.iter().filter(|g| g.is_member(user_id)).collect()
    }

    pub fn groups_organized_by(&self, user_id: &str) -> Vec<&GroupBuy> {
        self.groups.iter().filter(|g| g.is_organizer(user_id)).collect()
    }

    pub fn active_groups(&self) -> Vec<&GroupBuy> {
        self.groups
            .iter()
            .filter(|g| g.status == GroupStatus::Active)
            .collect()
    }

    pub fn is_member(&self, group_id: &str, user_id: &str) -> bool {
        self.get(group_id).is_some_and(|g| g.is_member(user_id))
    }

    pub fn can_delete(&self, group_id: &str, user_id: &str) -> bool {
        self.get(group_id).is_some_and(|g| g.is_organizer(user_id))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
