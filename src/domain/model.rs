use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::error::{GroupBuyError, Result};
use crate::utils::validation::{
    validate_non_negative_amount, validate_positive_amount, validate_positive_number,
    validate_required_field, Validate,
};

/// Lifecycle label of a campaign. Set by callers only; the registry never
/// derives it from amounts or dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    Active,
    Completed,
    Upcoming,
}

impl GroupStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupStatus::Active => "active",
            GroupStatus::Completed => "completed",
            GroupStatus::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for GroupStatus {
    type Err = GroupBuyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(GroupStatus::Active),
            "completed" => Ok(GroupStatus::Completed),
            "upcoming" => Ok(GroupStatus::Upcoming),
            other => Err(GroupBuyError::validation(
                "status",
                format!("unknown status '{}', expected active, completed or upcoming", other),
            )),
        }
    }
}

/// A pooled-purchase campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBuy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub organizer_id: String,
    pub location: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub participants: Vec<String>,
    pub max_participants: u32,
    pub time_left: String,
    pub category: String,
    pub savings: String,
    pub status: GroupStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl GroupBuy {
    pub fn is_member(&self, user_id: &str) -> bool {
        self.participants.iter().any(|p| p == user_id)
    }

    pub fn is_organizer(&self, user_id: &str) -> bool {
        self.organizer_id == user_id
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }

    /// Amount deducted when a member leaves: the average share
    /// `target_amount / max_participants`, not what the member paid in.
    pub fn average_share(&self) -> f64 {
        if self.max_participants == 0 {
            return 0.0;
        }
        self.target_amount / f64::from(self.max_participants)
    }
}

/// Checks a stored record, e.g. one read back from a snapshot.
impl Validate for GroupBuy {
    fn validate(&self) -> Result<()> {
        validate_required_field("id", &self.id)?;
        validate_required_field("organizer_id", &self.organizer_id)?;
        validate_positive_amount("target_amount", self.target_amount)?;
        validate_non_negative_amount("current_amount", self.current_amount)?;
        validate_positive_number("max_participants", self.max_participants, 1)?;

        let mut seen = HashSet::new();
        for participant in &self.participants {
            validate_required_field("participants", participant)?;
            if !seen.insert(participant.as_str()) {
                return Err(GroupBuyError::validation(
                    "participants",
                    format!("'{}' is listed more than once", participant),
                ));
            }
        }
        if !self.is_member(&self.organizer_id) {
            return Err(GroupBuyError::validation(
                "participants",
                format!("organizer '{}' is not a participant", self.organizer_id),
            ));
        }
        Ok(())
    }
}

/// Input for creating a campaign. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGroupBuy {
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub organizer_id: String,
    pub location: String,
    pub target_amount: f64,
    pub max_participants: u32,
    pub category: String,
    pub savings: String,
    pub status: GroupStatus,
    pub time_left: String,
    pub expires_at: DateTime<Utc>,
}

impl Validate for NewGroupBuy {
    fn validate(&self) -> Result<()> {
        validate_required_field("title", &self.title)?;
        validate_required_field("description", &self.description)?;
        validate_required_field("organizer", &self.organizer)?;
        validate_required_field("organizer_id", &self.organizer_id)?;
        validate_required_field("location", &self.location)?;
        validate_required_field("category", &self.category)?;
        validate_required_field("savings", &self.savings)?;
        validate_required_field("time_left", &self.time_left)?;
        validate_positive_amount("target_amount", self.target_amount)?;
        validate_positive_number("max_participants", self.max_participants, 1)?;
        Ok(())
    }
}

/// Fields that may change after creation. Identity, ownership, membership
/// and the pooled amount are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBuyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub savings: Option<String>,
    pub time_left: Option<String>,
    pub status: Option<GroupStatus>,
    pub expires_at: Option<DateTime<Utc>>,
    pub target_amount: Option<f64>,
    pub max_participants: Option<u32>,
}

impl GroupBuyPatch {
    pub fn is_empty(&self) -> bool {
        *self == GroupBuyPatch::default()
    }

    pub fn apply_to(self, group: &mut GroupBuy) {
        if let Some(title) = self.title {
            group.title = title;
        }
        if let Some(description) = self.description {
            group.description = description;
        }
        if let Some(location) = self.location {
            group.location = location;
        }
        if let Some(category) = self.category {
            group.category = category;
        }
        if let Some(savings) = self.savings {
            group.savings = savings;
        }
        if let Some(time_left) = self.time_left {
            group.time_left = time_left;
        }
        if let Some(status) = self.status {
            group.status = status;
        }
        if let Some(expires_at) = self.expires_at {
            group.expires_at = expires_at;
        }
        if let Some(target_amount) = self.target_amount {
            group.target_amount = target_amount;
        }
        if let Some(max_participants) = self.max_participants {
            group.max_participants = max_participants;
        }
    }
}

impl Validate for GroupBuyPatch {
    fn validate(&self) -> Result<()> {
        let strings = [
            ("title", &self.title),
            ("description", &self.description),
            ("location", &self.location),
            ("category", &self.category),
            ("savings", &self.savings),
            ("time_left", &self.time_left),
        ];
        for (field, value) in strings {
            if let Some(value) = value {
                validate_required_field(field, value)?;
            }
        }
        if let Some(target) = self.target_amount {
            validate_positive_amount("target_amount", target)?;
        }
        if let Some(max) = self.max_participants {
            validate_positive_number("max_participants", max, 1)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Order,
    Group,
    System,
    Payment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

/// `<prefix>-<unix millis>-<6 random hex chars>`
pub(crate) fn new_record_id(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, Utc::now().timestamp_millis(), &random[..6])
}
