use crate::core::snapshot::{DEFAULT_GROUPS_KEY, DEFAULT_NOTIFICATIONS_KEY};
use crate::core::ConfigProvider;
use crate::domain::policy::{RegistryPolicy, UpdatePolicy};
use crate::utils::error::{GroupBuyError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub storage: StorageConfig,
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub groups_key: String,
    pub notifications_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            groups_key: DEFAULT_GROUPS_KEY.to_string(),
            notifications_key: DEFAULT_NOTIFICATIONS_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub enforce_capacity: bool,
    pub update_policy: UpdatePolicy,
    pub seed_demo_data: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        let policy = RegistryPolicy::default();
        Self {
            enforce_capacity: policy.enforce_capacity,
            update_policy: policy.update_policy,
            seed_demo_data: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub format: LogFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GroupBuyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GroupBuyError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn groups_key(&self) -> &str {
        &self.storage.groups_key
    }

    fn notifications_key(&self) -> &str {
        &self.storage.notifications_key
    }

    fn registry_policy(&self) -> RegistryPolicy {
        RegistryPolicy {
            enforce_capacity: self.registry.enforce_capacity,
            update_policy: self.registry.update_policy,
        }
    }

    fn seed_demo_data(&self) -> bool {
        self.registry.seed_demo_data
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("storage.data_dir", &self.storage.data_dir)?;
        validate_non_empty_string("storage.groups_key", &self.storage.groups_key)?;
        validate_non_empty_string("storage.notifications_key", &self.storage.notifications_key)?;

        if self.storage.groups_key == self.storage.notifications_key {
            return Err(GroupBuyError::validation(
                "storage.notifications_key",
                "must differ from storage.groups_key",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_dir(), "./data");
        assert_eq!(config.groups_key(), "marketplace-groups");
        assert_eq!(config.notifications_key(), "marketplace-notifications");
        assert_eq!(config.registry_policy(), RegistryPolicy::default());
        assert!(!config.seed_demo_data());
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/group-buy"
groups_key = "groups"

[registry]
enforce_capacity = false
update_policy = "unrestricted"
seed_demo_data = true

[logging]
verbose = true
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/var/lib/group-buy");
        assert_eq!(config.groups_key(), "groups");
        assert_eq!(config.notifications_key(), "marketplace-notifications");
        assert_eq!(
            config.registry_policy(),
            RegistryPolicy {
                enforce_capacity: false,
                update_policy: UpdatePolicy::Unrestricted,
            }
        );
        assert!(config.seed_demo_data());
        assert!(config.logging.verbose);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GROUP_BUY_TEST_DATA_DIR", "/tmp/group-buy-test");

        let toml_content = r#"
[storage]
data_dir = "${GROUP_BUY_TEST_DATA_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/tmp/group-buy-test");

        std::env::remove_var("GROUP_BUY_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[storage]
data_dir = ""
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[storage]
groups_key = "same"
notifications_key = "same"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_update_policy_is_rejected() {
        let toml_content = r#"
[registry]
update_policy = "everyone"
"#;
        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(GroupBuyError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[registry]\nseed_demo_data = true\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.seed_demo_data());
    }
}
