//! Stage failure taxonomy.
//!
//! [`StageFailure`] is the structured error a stage hands back to the
//! pipeline. Its `Display` form is the outward wire string: classified
//! failures render as `RATE_LIMIT:<model>[:<hint>]` or
//! `MODEL_OVERLOAD:<model>` tags, which [`FailureTag`] parses back.

use crate::core::model::ModelId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three fixed pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Plan,
    Generate,
    Explain,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Plan => "plan",
            Stage::Generate => "generate",
            Stage::Explain => "explain",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a stage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    RateLimited,
    Overloaded,
    Transient,
    Fatal,
    ParseFailure,
    MissingCredential,
}

impl ErrorClass {
    /// Whether the orchestrator may move on to the next candidate model.
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, ErrorClass::MissingCredential)
    }
}

/// Failure of a single stage against a single model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageFailure {
    #[error("MISSING_API_KEY: No API key provided")]
    MissingCredential,

    #[error("RATE_LIMIT:{model}{}", hint_suffix(.retry_hint))]
    RateLimited {
        model: ModelId,
        retry_hint: Option<String>,
    },

    #[error("MODEL_OVERLOAD:{model}")]
    Overloaded { model: ModelId },

    #[error("TIMEOUT:{model}")]
    TimedOut { model: ModelId },

    #[error("{0}")]
    Parse(String),

    #[error("{0}")]
    Fatal(String),
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref().map(|h| format!(":{h}")).unwrap_or_default()
}

impl StageFailure {
    pub fn rate_limited(model: &ModelId) -> Self {
        StageFailure::RateLimited {
            model: model.clone(),
            retry_hint: None,
        }
    }

    pub fn overloaded(model: &ModelId) -> Self {
        StageFailure::Overloaded {
            model: model.clone(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        StageFailure::Parse(message.into())
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            StageFailure::MissingCredential => ErrorClass::MissingCredential,
            StageFailure::RateLimited { .. } => ErrorClass::RateLimited,
            StageFailure::Overloaded { .. } => ErrorClass::Overloaded,
            StageFailure::TimedOut { .. } => ErrorClass::Transient,
            StageFailure::Parse(_) => ErrorClass::ParseFailure,
            StageFailure::Fatal(_) => ErrorClass::Fatal,
        }
    }
}

/// Parsed form of a classified wire failure string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureTag {
    RateLimit {
        model: ModelId,
        retry_hint: Option<String>,
    },
    ModelOverload {
        model: ModelId,
    },
}

impl FailureTag {
    const RATE_LIMIT: &'static str = "RATE_LIMIT:";
    const MODEL_OVERLOAD: &'static str = "MODEL_OVERLOAD:";

    /// Parse a leading `RATE_LIMIT:` / `MODEL_OVERLOAD:` tag.
    ///
    /// Only the first line is inspected. Model identifiers never contain
    /// `:`, so the first colon after the model starts the retry hint.
    pub fn parse(message: &str) -> Option<Self> {
        let line = message.lines().next()?.trim();

        if let Some(rest) = line.strip_prefix(Self::RATE_LIMIT) {
            let (model, hint) = match rest.split_once(':') {
                Some((model, hint)) if !hint.is_empty() => (model, Some(hint.to_string())),
                Some((model, _)) => (model, None),
                None => (rest, None),
            };
            if model.is_empty() {
                return None;
            }
            return Some(FailureTag::RateLimit {
                model: ModelId::new(model),
                retry_hint: hint,
            });
        }

        if let Some(model) = line.strip_prefix(Self::MODEL_OVERLOAD) {
            if model.is_empty() {
                return None;
            }
            return Some(FailureTag::ModelOverload {
                model: ModelId::new(model),
            });
        }

        None
    }

    pub fn model(&self) -> &ModelId {
        match self {
            FailureTag::RateLimit { model, .. } | FailureTag::ModelOverload { model } => model,
        }
    }
}
