//! CLI entrypoint for dezin
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use dezin_application::{GenerateUiUseCase, NoProgress, ProgressNotifier};
use dezin_domain::{ApiKey, ChatMessage, GenerationRequest, ModelId, RequestResult};
use dezin_infrastructure::{ConfigLoader, FileConfig, GeminiGateway};
use dezin_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting dezin");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_deref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        println!("\nEffective configuration:\n{:#?}", config);
        return Ok(ExitCode::SUCCESS);
    }

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", issue);
    }
    if FileConfig::has_errors(&issues) {
        bail!("Invalid configuration");
    }

    let hierarchy = config.models.to_hierarchy()?;
    let default_model = config.models.default_model();

    if cli.list_models {
        print!("{}", ConsoleFormatter::format_hierarchy(&hierarchy, &default_model));
        return Ok(ExitCode::SUCCESS);
    }

    // Single request mode - prompt is required
    let prompt = match cli.prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => bail!("A prompt is required. Run with --help for usage."),
    };

    let history = match &cli.history {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };

    let model = cli
        .model
        .as_deref()
        .map(ModelId::new)
        .unwrap_or(default_model);

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiGateway::with_base_url(config.gemini.base_url())?);

    let progress: Arc<dyn ProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else if cli.verbose > 0 {
        // Spinners would interleave with log lines
        Arc::new(SimpleProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let use_case = GenerateUiUseCase::new(gateway, hierarchy)
        .with_retry_policy(config.retry.to_retry_policy())
        .with_default_credential(config.gemini.api_key())
        .with_progress(progress);

    let request = GenerationRequest::new(prompt, model)
        .with_history(history)
        .with_credential(cli.api_key.and_then(ApiKey::new));

    let result = match use_case.execute(request).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Request rejected: {}", e);
            RequestResult::Failure {
                aggregated_message: e.to_string(),
            }
        }
    };

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(&result),
        OutputFormat::Json => ConsoleFormatter::format_json(&result),
        OutputFormat::Code => ConsoleFormatter::format_code_only(&result),
    };

    if result.is_success() {
        println!("{}", output);
        Ok(ExitCode::SUCCESS)
    } else if cli.output == OutputFormat::Json {
        println!("{}", output);
        Ok(ExitCode::FAILURE)
    } else {
        eprintln!("{}", output);
        Ok(ExitCode::FAILURE)
    }
}

/// Initialize logging based on verbosity level, optionally teeing to a file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}

/// Read prior conversation turns from a JSON file
fn load_history(path: &Path) -> Result<Vec<ChatMessage>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid history file (expected [{{role, content}}]): {}", path.display()))
}
