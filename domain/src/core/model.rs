//! Model identifier value object

use serde::{Deserialize, Serialize};

/// Identifier of a remote generative model (Value Object)
///
/// Opaque to the orchestration core: two identifiers are the same model
/// exactly when their strings are equal. Well-known Gemini identifiers are
/// exposed as associated constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub const GEMINI_25_PRO: &'static str = "gemini-2.5-pro";
    pub const GEMINI_25_FLASH: &'static str = "gemini-2.5-flash";
    pub const GEMINI_20_FLASH: &'static str = "gemini-2.0-flash";
    pub const GEMINI_25_FLASH_LITE: &'static str = "gemini-2.5-flash-lite";
    pub const GEMINI_20_FLASH_LITE: &'static str = "gemini-2.0-flash-lite";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Model selected when the caller does not name one
    pub fn default_selection() -> Self {
        Self::new(Self::GEMINI_25_FLASH)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ModelId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ModelId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ModelId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
