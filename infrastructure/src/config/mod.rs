//! Configuration loading for dezin
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GEMINI_API_KEY` environment variable (credential only)
//! 2. `DEZIN_*` environment variables (`__` separates sections)
//! 3. `--config <path>` specified file
//! 4. Project root: `./dezin.toml` or `./.dezin.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/dezin/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigIssueCode, FileConfig, FileGeminiConfig, FileModelsConfig,
    FileRetryConfig, Severity,
};
pub use loader::ConfigLoader;
