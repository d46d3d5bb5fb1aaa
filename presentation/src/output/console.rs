//! Console output formatter for generation results

use colored::Colorize;
use dezin_domain::{ModelHierarchy, ModelId, RequestResult};

/// Formats generation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result
    pub fn format(result: &RequestResult) -> String {
        let mut output = String::new();

        match result {
            RequestResult::Success(response) => {
                output.push_str(&Self::header(&format!("Generated with {}", response.model)));
                output.push('\n');

                if let Some(layout) = &response.layout {
                    let layout = layout
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| layout.to_string());
                    output.push_str(&format!("{} {}\n", "Layout:".cyan().bold(), layout));
                }

                output.push_str(&Self::section_header("Explanation"));
                output.push_str(&response.message);
                output.push('\n');

                output.push_str(&Self::section_header("Code"));
                output.push_str(&response.code);
                if !response.code.ends_with('\n') {
                    output.push('\n');
                }
            }
            RequestResult::Failure { aggregated_message } => {
                output.push_str(&Self::header("Generation failed"));
                output.push('\n');
                output.push_str(&aggregated_message.red().to_string());
                output.push('\n');
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(result: &RequestResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Component source only; the aggregated message for failures
    pub fn format_code_only(result: &RequestResult) -> String {
        match result {
            RequestResult::Success(response) => response.code.clone(),
            RequestResult::Failure { aggregated_message } => aggregated_message.clone(),
        }
    }

    /// Hierarchy listing for `--list-models`, marking the default selection
    pub fn format_hierarchy(hierarchy: &ModelHierarchy, default: &ModelId) -> String {
        let mut output = format!("{}\n", "Model hierarchy (best first):".cyan().bold());
        for (i, model) in hierarchy.models().iter().enumerate() {
            let marker = if model == default {
                " (default)".green().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!("  {}. {}{}\n", i + 1, model, marker));
        }
        if !hierarchy.contains(default) {
            output.push_str(&format!(
                "\n{} default model '{}' is not in the hierarchy\n",
                "warning:".yellow().bold(),
                default
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
