//! Model configuration from TOML (`[models]` section)

use super::validation::{ConfigIssue, ConfigIssueCode};
use dezin_domain::{DomainError, ModelHierarchy, ModelId};
use serde::{Deserialize, Serialize};

/// Model configuration from TOML
///
/// # Example
///
/// ```toml
/// [models]
/// hierarchy = ["gemini-2.5-pro", "gemini-2.5-flash", "gemini-2.0-flash"]
/// default = "gemini-2.5-flash"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Candidate models, best to worst. Built-in Gemini ranking when unset.
    pub hierarchy: Option<Vec<String>>,
    /// Model used when the request does not name one
    pub default: Option<String>,
}

impl FileModelsConfig {
    /// Build the hierarchy, falling back to the built-in ranking.
    pub fn to_hierarchy(&self) -> Result<ModelHierarchy, DomainError> {
        match &self.hierarchy {
            Some(names) => ModelHierarchy::new(names.iter().map(ModelId::new)),
            None => Ok(ModelHierarchy::default()),
        }
    }

    pub fn default_model(&self) -> ModelId {
        self.default
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ModelId::new)
            .unwrap_or_else(ModelId::default_selection)
    }

    fn lists(&self, name: &str) -> bool {
        match &self.hierarchy {
            Some(names) => names.iter().any(|n| n.trim() == name),
            None => ModelHierarchy::default().contains(&ModelId::new(name)),
        }
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if let Some(names) = &self.hierarchy {
            if names.is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyHierarchy,
                    "models.hierarchy: at least one model is required",
                ));
            }
            if names.iter().any(|n| n.trim().is_empty()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    "models.hierarchy: model name cannot be empty",
                ));
            }
        }

        match self.default.as_deref() {
            Some(name) if name.trim().is_empty() => issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyModelName,
                "models.default: model name cannot be empty",
            )),
            Some(name) if !self.lists(name.trim()) => issues.push(ConfigIssue::warning(
                ConfigIssueCode::DefaultNotInHierarchy,
                format!(
                    "models.default: '{}' is not in the model hierarchy and will never be attempted",
                    name
                ),
            )),
            Some(_) => {}
            None => {}
        }

        issues
    }
}
