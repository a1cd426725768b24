use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupBuyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Snapshot error: {message}")]
    SnapshotError { message: String },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid value for {field}: {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Group buy not found: {id}")]
    NotFound { id: String },

    #[error("User {user_id} is not allowed to modify group {group_id}")]
    Unauthorized { user_id: String, group_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 輸入錯誤，使用者可自行修正
    Low,
    /// 設定或快照問題
    Medium,
    /// 系統層級 (IO、序列化)
    Critical,
}

impl GroupBuyError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        GroupBuyError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            GroupBuyError::MissingFieldError { .. }
            | GroupBuyError::ValidationError { .. }
            | GroupBuyError::NotFound { .. }
            | GroupBuyError::Unauthorized { .. } => ErrorSeverity::Low,
            GroupBuyError::ConfigError { .. } | GroupBuyError::SnapshotError { .. } => {
                ErrorSeverity::Medium
            }
            GroupBuyError::IoError(_)
            | GroupBuyError::SerializationError(_)
            | GroupBuyError::CsvError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GroupBuyError::MissingFieldError { field } => {
                format!("The field '{}' is required", field)
            }
            GroupBuyError::ValidationError { field, reason } => {
                format!("'{}' is invalid: {}", field, reason)
            }
            GroupBuyError::NotFound { id } => format!("No group buy with id '{}'", id),
            GroupBuyError::Unauthorized { user_id, .. } => {
                format!("'{}' is not the organizer of this group buy", user_id)
            }
            GroupBuyError::ConfigError { message } => format!("Configuration problem: {}", message),
            GroupBuyError::SnapshotError { message } => {
                format!("Saved data could not be read: {}", message)
            }
            other => format!("Unexpected failure: {}", other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GroupBuyError::MissingFieldError { .. } | GroupBuyError::ValidationError { .. } => {
                "Check the command arguments and try again"
            }
            GroupBuyError::NotFound { .. } => "Run `group-buy list` to see existing group ids",
            GroupBuyError::Unauthorized { .. } => "Only the organizer can perform this action",
            GroupBuyError::ConfigError { .. } => "Verify the TOML configuration file",
            GroupBuyError::SnapshotError { .. } => {
                "Inspect or remove the snapshot file in the data directory"
            }
            GroupBuyError::IoError(_) => "Check that the data directory exists and is writable",
            GroupBuyError::SerializationError(_) | GroupBuyError::CsvError(_) => {
                "Re-run with --verbose for details"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GroupBuyError>;
