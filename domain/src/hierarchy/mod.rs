//! Model hierarchy and per-request attempt ordering.
//!
//! The [`ModelHierarchy`] is process-wide read-only configuration, built once
//! at startup and injected into the orchestrator. Each request derives an
//! [`AttemptOrder`] from it.

use crate::core::error::DomainError;
use crate::core::model::ModelId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ranked candidate models, best to worst.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ModelId>", into = "Vec<ModelId>")]
pub struct ModelHierarchy {
    models: Vec<ModelId>,
}

impl ModelHierarchy {
    /// Build a hierarchy. Duplicate entries keep their first (best) rank.
    pub fn new(models: impl IntoIterator<Item = ModelId>) -> Result<Self, DomainError> {
        let models = dedup_preserving_order(models);
        if models.is_empty() {
            return Err(DomainError::EmptyHierarchy);
        }
        if let Some(blank) = models.iter().find(|m| m.as_str().trim().is_empty()) {
            return Err(DomainError::InvalidModel(blank.to_string()));
        }
        Ok(Self { models })
    }

    /// The Gemini family, best to worst.
    pub fn gemini() -> Self {
        Self {
            models: [
                ModelId::GEMINI_25_PRO,
                ModelId::GEMINI_25_FLASH,
                ModelId::GEMINI_20_FLASH,
                ModelId::GEMINI_25_FLASH_LITE,
                ModelId::GEMINI_20_FLASH_LITE,
            ]
            .into_iter()
            .map(ModelId::new)
            .collect(),
        }
    }

    pub fn models(&self) -> &[ModelId] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn contains(&self, model: &ModelId) -> bool {
        self.models.contains(model)
    }

    /// Rotate the hierarchy so it starts at `selected`.
    ///
    /// When `selected` is not a member the hierarchy is returned unchanged.
    pub fn attempt_order(&self, selected: &ModelId) -> AttemptOrder {
        let rotated: Vec<ModelId> = match self.models.iter().position(|m| m == selected) {
            Some(start) => self.models[start..]
                .iter()
                .chain(&self.models[..start])
                .cloned()
                .collect(),
            None => self.models.clone(),
        };

        AttemptOrder {
            models: dedup_preserving_order(rotated),
        }
    }
}

impl Default for ModelHierarchy {
    fn default() -> Self {
        Self::gemini()
    }
}

impl TryFrom<Vec<ModelId>> for ModelHierarchy {
    type Error = DomainError;

    fn try_from(models: Vec<ModelId>) -> Result<Self, Self::Error> {
        Self::new(models)
    }
}

impl From<ModelHierarchy> for Vec<ModelId> {
    fn from(hierarchy: ModelHierarchy) -> Self {
        hierarchy.models
    }
}

/// Sequence of models to try for one request, each exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptOrder {
    models: Vec<ModelId>,
}

impl AttemptOrder {
    pub fn models(&self) -> &[ModelId] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn first(&self) -> Option<&ModelId> {
        self.models.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelId> {
        self.models.iter()
    }
}

impl<'a> IntoIterator for &'a AttemptOrder {
    type Item = &'a ModelId;
    type IntoIter = std::slice::Iter<'a, ModelId>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}

fn dedup_preserving_order(models: impl IntoIterator<Item = ModelId>) -> Vec<ModelId> {
    let mut seen = HashSet::new();
    models
        .into_iter()
        .filter(|m| seen.insert(m.clone()))
        .collect()
}
