//! Failure history for one request and the user-facing text built from it.

use super::entities::AttemptRecord;
use crate::core::model::ModelId;

const NOT_IN_HIERARCHY: &str = "is not in the model hierarchy";
const DAILY_RESET_GUIDANCE: &str = "All available models have reached their quota limits. \
Quota limits reset daily. Please try again tomorrow.";

/// Ordered failure records for one request.
///
/// The user's own model is kept apart from the fallback attempts so that
/// every rendered message can lead with it.
#[derive(Debug, Clone)]
pub struct AttemptHistory {
    selected: ModelId,
    selected_failure: Option<AttemptRecord>,
    fallbacks: Vec<AttemptRecord>,
}

impl AttemptHistory {
    pub fn new(selected: ModelId) -> Self {
        Self {
            selected,
            selected_failure: None,
            fallbacks: Vec::new(),
        }
    }

    pub fn record(&mut self, record: AttemptRecord) {
        if record.model == self.selected {
            self.selected_failure = Some(record);
        } else {
            self.fallbacks.push(record);
        }
    }

    pub fn selected(&self) -> &ModelId {
        &self.selected
    }

    pub fn selected_failure(&self) -> Option<&AttemptRecord> {
        self.selected_failure.as_ref()
    }

    pub fn fallbacks(&self) -> &[AttemptRecord] {
        &self.fallbacks
    }

    /// All records, the user's model first.
    pub fn records(&self) -> impl Iterator<Item = &AttemptRecord> {
        self.selected_failure.iter().chain(self.fallbacks.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.selected_failure.is_none() && self.fallbacks.is_empty()
    }

    /// Disclosure appended to a result produced by a model other than the user's.
    pub fn fallback_note(&self, used: &ModelId) -> String {
        let mut note = String::from("\n\n---\n");

        match &self.selected_failure {
            Some(record) => note.push_str(&format!(
                "**⚠️ Note:** Your selected model **{}** failed: {}.\n",
                self.selected,
                record.display_reason()
            )),
            None => note.push_str(&format!(
                "**⚠️ Note:** Your selected model **{}** {}.\n",
                self.selected, NOT_IN_HIERARCHY
            )),
        }

        if !self.fallbacks.is_empty() {
            note.push_str("\nI also tried:\n");
            note.push_str(&bullet_list(&self.fallbacks));
        }

        note.push_str(&format!(
            "\n✅ Successfully generated using **{}** instead.",
            used
        ));
        note
    }

    /// Aggregated report returned when every candidate model failed.
    pub fn failure_report(&self) -> String {
        let mut report = match &self.selected_failure {
            Some(record) => format!(
                "**Your selected model failed:**\n- **{}**: {}\n",
                self.selected,
                record.display_reason()
            ),
            None => format!(
                "**Your selected model was not tried:**\n- **{}**: {}\n",
                self.selected, NOT_IN_HIERARCHY
            ),
        };

        if !self.fallbacks.is_empty() {
            report.push_str("\n**Fallback models also failed:**\n");
            report.push_str(&bullet_list(&self.fallbacks));
        }

        report.push('\n');
        report.push_str(DAILY_RESET_GUIDANCE);
        report
    }
}

fn bullet_list(records: &[AttemptRecord]) -> String {
    let mut out = records
        .iter()
        .map(|r| format!("- **{}**: {}", r.model, r.display_reason()))
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}
