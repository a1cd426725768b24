use serde::Serialize;

use crate::domain::model::GroupBuy;
use crate::utils::error::{GroupBuyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// One flat CSV row per group; participants are joined with `;`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupRow<'a> {
    id: &'a str,
    title: &'a str,
    organizer: &'a str,
    organizer_id: &'a str,
    location: &'a str,
    category: &'a str,
    status: &'a str,
    target_amount: f64,
    current_amount: f64,
    progress_percent: Option<f64>,
    participant_count: usize,
    max_participants: u32,
    participants: String,
    savings: &'a str,
    time_left: &'a str,
    created_at: String,
    expires_at: String,
}

impl<'a> From<&'a GroupBuy> for GroupRow<'a> {
    fn from(group: &'a GroupBuy) -> Self {
        Self {
            id: &group.id,
            title: &group.title,
            organizer: &group.organizer,
            organizer_id: &group.organizer_id,
            location: &group.location,
            category: &group.category,
            status: group.status.as_str(),
            target_amount: group.target_amount,
            current_amount: group.current_amount,
            progress_percent: group.progress_percent().ok(),
            participant_count: group.participants.len(),
            max_participants: group.max_participants,
            participants: group.participants.join(";"),
            savings: &group.savings,
            time_left: &group.time_left,
            created_at: group.created_at.to_rfc3339(),
            expires_at: group.expires_at.to_rfc3339(),
        }
    }
}

pub fn export_csv(groups: &[GroupBuy]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for group in groups {
        writer.serialize(GroupRow::from(group))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| GroupBuyError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| GroupBuyError::validation("export", e.to_string()))
}

pub fn export_json(groups: &[GroupBuy]) -> Result<String> {
    Ok(serde_json::to_string_pretty(groups)?)
}

pub fn export(groups: &[GroupBuy], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Csv => export_csv(groups),
        ExportFormat::Json => export_json(groups),
    }
}
