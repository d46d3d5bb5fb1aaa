//! Progress reporting for UI generation

use colored::Colorize;
use dezin_application::ports::progress::ProgressNotifier;
use dezin_domain::{AttemptRecord, ModelId, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per attempted model
pub struct ProgressReporter {
    multi: MultiProgress,
    attempt_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            attempt_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn stage_display_name(stage: Stage) -> &'static str {
        match stage {
            Stage::Plan => "Plan",
            Stage::Generate => "Generate",
            Stage::Explain => "Explain",
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.attempt_bar.lock() {
            if let Some(pb) = guard.as_ref() {
                f(pb);
            }
        }
    }

    fn finish(&self, message: String) {
        let finished = self.attempt_bar.lock().ok().and_then(|mut guard| guard.take());
        if let Some(pb) = finished {
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_attempt_start(&self, model: &ModelId, index: usize, total: usize) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(format!("[{}/{}] {}", index + 1, total, model));
        pb.set_message("Planning...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.attempt_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_stage_complete(&self, _model: &ModelId, stage: Stage, success: bool) {
        let status = if success {
            format!("{} {}", "v".green(), Self::stage_display_name(stage))
        } else {
            format!("{} {}", "x".red(), Self::stage_display_name(stage))
        };
        self.with_bar(|pb| pb.set_message(status));
    }

    fn on_attempt_failed(&self, record: &AttemptRecord) {
        self.finish(format!(
            "{} {} failed: {}",
            "x".red(),
            Self::stage_display_name(record.stage),
            record.display_reason()
        ));
    }

    fn on_retry(&self, _model: &ModelId, attempt: u32, delay: Duration) {
        self.with_bar(|pb| {
            pb.set_message(format!(
                "{} retry #{} in {}s",
                "~".yellow(),
                attempt,
                delay.as_secs()
            ))
        });
    }

    fn on_attempt_succeeded(&self, _model: &ModelId) {
        self.finish(format!("{}", "Done!".green()));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_attempt_start(&self, model: &ModelId, index: usize, total: usize) {
        eprintln!(
            "{} {} ({}/{})",
            "->".cyan(),
            model.as_str().bold(),
            index + 1,
            total
        );
    }

    fn on_stage_complete(&self, _model: &ModelId, stage: Stage, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), ProgressReporter::stage_display_name(stage));
        } else {
            eprintln!(
                "  {} {} (failed)",
                "x".red(),
                ProgressReporter::stage_display_name(stage)
            );
        }
    }

    fn on_attempt_failed(&self, record: &AttemptRecord) {
        eprintln!("  {} {}", "x".red(), record.display_reason());
    }

    fn on_retry(&self, model: &ModelId, attempt: u32, delay: Duration) {
        eprintln!(
            "  {} {} retry #{} in {}s",
            "~".yellow(),
            model,
            attempt,
            delay.as_secs()
        );
    }
}
