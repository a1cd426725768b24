use serde::{Deserialize, Serialize};

/// Who may apply a [`GroupBuyPatch`](super::model::GroupBuyPatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Same rule as delete: only the organizer.
    #[default]
    OrganizerOnly,
    /// Anyone; the caller is trusted to have authorized the edit.
    Unrestricted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryPolicy {
    /// Refuse joins once `participants.len() >= max_participants`.
    pub enforce_capacity: bool,
    pub update_policy: UpdatePolicy,
}

impl Default for RegistryPolicy {
    fn default() -> Self {
        Self {
            enforce_capacity: true,
            update_policy: UpdatePolicy::OrganizerOnly,
        }
    }
}
