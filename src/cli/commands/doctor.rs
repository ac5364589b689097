//! Doctor command - verify credentials, configuration, and pipeline artifacts.

use crate::cli::Output;
use crate::config::Settings;
use crate::openai;
use crate::store::{self, DataPaths};
use crate::transcription::{deepgram, StructuredTranscript};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Referat Doctor");
    println!();
    println!("Checking credentials, configuration, and pipeline artifacts...\n");

    let paths = DataPaths::from_settings(settings);
    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let key_checks = vec![
        check_api_key(
            "DEEPGRAM_API_KEY",
            deepgram::is_api_key_configured(),
            "Needed to transcribe the recording (referat transcribe)",
        ),
        check_api_key(
            "OPENAI_API_KEY",
            openai::is_api_key_configured(),
            "Needed for embeddings, question answering, and summaries",
        ),
    ];
    for check in &key_checks {
        check.print();
    }
    checks.extend(key_checks);

    println!();

    println!("{}", style("Recording").bold());
    let recording_check = check_file(
        "Recording",
        &paths.audio(),
        "Place the source recording in the data directory",
    );
    recording_check.print();
    checks.push(recording_check);

    println!();

    println!("{}", style("Pipeline Artifacts").bold());
    let artifact_checks = vec![
        check_artifact("Raw transcription", &paths.raw_transcription()),
        check_artifact("Structured transcript", &paths.structured_transcript()),
        check_artifact("Embeddings", &paths.embeddings()),
        check_artifact("Detailed summary", &paths.detailed_summary()),
        check_alignment(&paths),
    ];
    for check in &artifact_checks {
        check.print();
    }
    checks.extend(artifact_checks);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Referat is ready to use.");
    }

    Ok(())
}

/// Report whether an API key is configured, masking its value in the output.
fn check_api_key(name: &str, configured: bool, hint: &str) -> CheckResult {
    if !configured {
        return CheckResult::warning(name, "not set", hint);
    }

    match std::env::var(name) {
        Ok(key) if key.len() > 8 => {
            let masked = format!("{}...{}", &key[..4], &key[key.len() - 4..]);
            CheckResult::ok(name, &format!("configured ({})", masked))
        }
        _ => CheckResult::ok(name, "configured"),
    }
}

/// Check that a required file exists.
fn check_file(name: &str, path: &Path, hint: &str) -> CheckResult {
    if path.exists() {
        let size = std::fs::metadata(path)
            .map(|m| format_size(m.len()))
            .unwrap_or_else(|_| "unknown size".to_string());
        CheckResult::ok(name, &format!("{} ({})", path.display(), size))
    } else {
        CheckResult::error(name, &format!("{} (missing)", path.display()), hint)
    }
}

/// Check a pipeline artifact; absence is only a warning.
fn check_artifact(name: &str, path: &Path) -> CheckResult {
    if path.exists() {
        let size = std::fs::metadata(path)
            .map(|m| format_size(m.len()))
            .unwrap_or_else(|_| "unknown size".to_string());
        CheckResult::ok(name, &format!("{} ({})", path.display(), size))
    } else {
        CheckResult::warning(
            name,
            &format!("{} (not generated yet)", path.display()),
            "Run 'referat transcribe' (or 'referat summarize') to generate it",
        )
    }
}

/// Verify that the embeddings line up with the paragraphs.
fn check_alignment(paths: &DataPaths) -> CheckResult {
    let transcript_path = paths.structured_transcript();
    let embeddings_path = paths.embeddings();

    if !transcript_path.exists() || !embeddings_path.exists() {
        return CheckResult::warning(
            "Embedding alignment",
            "not checked (artifacts missing)",
            "Run 'referat transcribe' to generate both artifacts",
        );
    }

    let transcript: StructuredTranscript = match store::read_json(&transcript_path) {
        Ok(t) => t,
        Err(e) => {
            return CheckResult::error(
                "Embedding alignment",
                &format!("cannot read structured transcript: {}", e),
                "Re-run 'referat transcribe'",
            )
        }
    };
    let embeddings: Vec<Vec<f32>> = match store::read_json(&embeddings_path) {
        Ok(e) => e,
        Err(e) => {
            return CheckResult::error(
                "Embedding alignment",
                &format!("cannot read embeddings: {}", e),
                "Re-run 'referat transcribe'",
            )
        }
    };

    if embeddings.len() == transcript.paragraphs.len() {
        CheckResult::ok(
            "Embedding alignment",
            &format!("{} paragraphs, {} vectors", transcript.paragraphs.len(), embeddings.len()),
        )
    } else {
        CheckResult::error(
            "Embedding alignment",
            &format!(
                "{} paragraphs but {} vectors",
                transcript.paragraphs.len(),
                embeddings.len()
            ),
            "Delete the embeddings file and re-run 'referat transcribe'",
        )
    }
}

/// Check if config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create one with 'referat config show > config.toml' and pass --config",
        )
    }
}

/// Format file size in human-readable format.
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
