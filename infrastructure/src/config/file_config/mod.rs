//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain/application types
//! on demand.

mod gemini;
mod models;
mod retry;
mod validation;

pub use gemini::FileGeminiConfig;
pub use models::FileModelsConfig;
pub use retry::FileRetryConfig;
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model hierarchy and default selection
    pub models: FileModelsConfig,
    /// Transport retry settings
    pub retry: FileRetryConfig,
    /// Gemini provider settings
    pub gemini: FileGeminiConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.models.validate());
        issues.extend(self.retry.validate());
        issues
    }

    /// Whether any detected issue is fatal
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(|i| i.severity == Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dezin_domain::ModelId;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[models]
hierarchy = ["gemini-2.5-pro", "gemini-2.5-flash"]
default = "gemini-2.5-pro"

[retry]
max_attempts = 5
base_delay_ms = 500
call_timeout_secs = 30

[gemini]
api_key = "secret"
base_url = "http://localhost:9000"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let hierarchy = config.models.to_hierarchy().unwrap();
        assert_eq!(hierarchy.len(), 2);
        assert_eq!(config.models.default_model(), ModelId::new("gemini-2.5-pro"));

        let policy = config.retry.to_retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.call_timeout, Some(Duration::from_secs(30)));

        assert_eq!(config.gemini.api_key().unwrap().expose(), "secret");
        assert_eq!(config.gemini.base_url(), "http://localhost:9000");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[retry]
max_attempts = 1
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.retry.max_attempts, 1);
        // Defaults should apply
        assert_eq!(config.retry.base_delay_ms, 2000);
        assert!(config.models.hierarchy.is_none());
        assert!(config.gemini.api_key().is_none());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.models.to_hierarchy().unwrap().len(), 5);
        assert_eq!(config.models.default_model(), ModelId::default_selection());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_every_issue() {
        let toml_str = r#"
[models]
hierarchy = ["gemini-2.5-pro", " "]
default = "gemini-3-ultra"

[retry]
max_attempts = 0
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let codes: Vec<_> = issues.iter().map(|i| i.code).collect();

        assert_eq!(
            codes,
            vec![
                ConfigIssueCode::EmptyModelName,
                ConfigIssueCode::DefaultNotInHierarchy,
                ConfigIssueCode::ZeroAttempts,
            ]
        );
        assert!(FileConfig::has_errors(&issues));
    }

    #[test]
    fn test_default_outside_hierarchy_is_only_a_warning() {
        let toml_str = r#"
[models]
default = "my-tuned-model"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(!FileConfig::has_errors(&issues));
    }
}
