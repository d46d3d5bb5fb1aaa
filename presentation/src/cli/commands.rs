//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for generation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Explanation, fallback note and code, formatted for the terminal
    Text,
    /// The outward JSON payload (`{message, code, layout, model}` or `{error}`)
    Json,
    /// Only the generated component source
    Code,
}

/// CLI arguments for dezin
#[derive(Parser, Debug)]
#[command(name = "dezin")]
#[command(author, version, about = "Generate UI components from a prompt with model fallback")]
#[command(long_about = r#"
dezin turns a natural-language request into a UI component.

Each request runs three stages against one model:
1. Plan: the model drafts a structured UI plan (JSON)
2. Generate: the plan becomes component source code
3. Explain: a short explanation of the design (runs alongside Generate)

When the selected model is rate limited or overloaded, the remaining models
of the hierarchy are tried in order and the result says which one was used.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./dezin.toml          Project-level config
3. ~/.config/dezin/config.toml   Global config

The API key is read from --api-key, GEMINI_API_KEY, or [gemini] api_key.

Example:
  dezin "A pricing page with three tiers"
  dezin -m gemini-2.5-pro -o code "Login form with remember-me" > Login.jsx
  dezin --history chat.json "Make the header sticky"
"#)]
pub struct Cli {
    /// What to build (required unless an informational flag is given)
    pub prompt: Option<String>,

    /// Model to try first
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// API key (overrides GEMINI_API_KEY and config files)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Prior conversation as a JSON array of {role, content}
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the model hierarchy and exit
    #[arg(long)]
    pub list_models: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Whether this invocation only prints information and exits
    pub fn is_informational(&self) -> bool {
        self.show_config || self.list_models
    }
}
