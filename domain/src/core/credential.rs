//! API credential value object

/// API key used to authenticate against the remote model provider.
///
/// Shared read-only by every call within one request. `Debug` never prints
/// the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank keys, so "supplied but empty" behaves like "absent".
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Explicit credential first, then the process-wide default.
    pub fn resolve(explicit: Option<&ApiKey>, fallback: Option<&ApiKey>) -> Option<ApiKey> {
        explicit.or(fallback).cloned()
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
