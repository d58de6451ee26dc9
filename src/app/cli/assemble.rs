//! Assemble, validate and summary commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::app::{AppContext, api};
use crate::domain::{AppError, PromptEngine, RawAssemblyRequest, Severity, ValidationReport};
use crate::ports::{AuditSink, NoopAuditSink};
use crate::services::JsonlAuditLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Flattened instruction text
    Text,
    /// Full assembly result as JSON
    Json,
    /// Role-tagged chat messages as JSON
    Messages,
}

pub fn run_assemble(
    engine: PromptEngine,
    request_path: &Path,
    format: OutputFormat,
    audit_log: Option<PathBuf>,
) -> Result<(), AppError> {
    let raw = RawAssemblyRequest::from_json(&read_input(request_path)?)?;

    match audit_log {
        Some(path) => assemble_with(AppContext::new(engine, JsonlAuditLog::new(path)), &raw, format),
        None => assemble_with(AppContext::new(engine, NoopAuditSink), &raw, format),
    }
}

fn assemble_with<A: AuditSink>(
    mut ctx: AppContext<A>,
    raw: &RawAssemblyRequest,
    format: OutputFormat,
) -> Result<(), AppError> {
    let outcome = api::assemble(&mut ctx, raw)?;
    emit_findings(&outcome.report);

    let output = match format {
        OutputFormat::Text => outcome.result.flattened_text,
        OutputFormat::Json => to_pretty_json(&outcome.result)?,
        OutputFormat::Messages => to_pretty_json(&outcome.result.chat_messages)?,
    };
    println!("{}", output);
    Ok(())
}

pub fn run_validate(result_path: &Path) -> Result<i32, AppError> {
    let report = api::validate_result_json(&read_input(result_path)?)?;

    for finding in &report.findings {
        println!("[{}] {}: {}", finding.severity, finding.code, finding.message);
    }
    if report.valid {
        println!("✅ Result passed validation");
        Ok(0)
    } else {
        println!(
            "❌ Result failed validation ({} critical, {} error)",
            report.count(Severity::Critical),
            report.count(Severity::Error)
        );
        Ok(1)
    }
}

pub fn run_summary(request_path: &Path) -> Result<(), AppError> {
    let raw = RawAssemblyRequest::from_json(&read_input(request_path)?)?;
    let summary = api::summarize_request(&raw)?;
    println!("{}", to_pretty_json(&summary)?);
    Ok(())
}

fn emit_findings(report: &ValidationReport) {
    for finding in &report.findings {
        eprintln!("[{}] {}: {}", finding.severity, finding.code, finding.message);
    }
}

fn read_input(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        return Ok(content);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::parse_error("output", err))
}
