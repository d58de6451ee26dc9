//! Pre-send validation of assembled prompts.
//!
//! Runs independently of assembly: every check re-derives the expected gating
//! from the result's own metadata, the context sections the renderer recorded
//! and the components, so a hand-built or tampered result is judged the same
//! way as an engine-built one. Problem text is never scanned for headings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::policy::NON_DISCLOSURE_DIRECTIVE;
use crate::domain::prompt::{AssemblyResult, ContextSection};
use crate::domain::{AttemptState, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub code: String,
    pub message: String,
}

/// Outcome of [`validate`]. Callers must not send a prompt whose report is invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    fn push(&mut self, severity: Severity, code: &str, message: impl Into<String>) {
        self.findings.push(Finding { severity, code: code.to_string(), message: message.into() });
    }

    pub fn has_critical(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Critical)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings.iter().filter(|f| f.severity == severity).count()
    }

    /// Blocking findings joined into one line.
    pub fn blocking_summary(&self) -> String {
        self.findings
            .iter()
            .filter(|f| f.severity >= Severity::Error)
            .map(|f| format!("{}: {}", f.severity, f.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check a result against the gating rules and the non-disclosure requirement.
pub fn validate(result: &AssemblyResult) -> ValidationReport {
    let mut report = ValidationReport::default();
    let components = &result.components;
    let meta = &result.metadata;

    if components.system.trim().is_empty() {
        report.push(Severity::Error, "missing_system_layer", "Missing system prompt");
    }
    if !components.system.contains(NON_DISCLOSURE_DIRECTIVE) {
        report.push(
            Severity::Critical,
            "missing_non_disclosure",
            format!("System prompt missing answer leakage prevention ('{}')", NON_DISCLOSURE_DIRECTIVE),
        );
    }

    let hints_present = meta.hints_allowed > 0;
    if hints_present && meta.tier.is_competitive() && meta.attempt_state == AttemptState::Active {
        report.push(
            Severity::Critical,
            "competitive_tier_hints",
            format!("{} tier has hints during active attempt", meta.tier),
        );
    }
    if hints_present && meta.attempt_state != AttemptState::Active {
        report.push(
            Severity::Critical,
            "hints_outside_active",
            format!("Hints included during {} state", meta.attempt_state),
        );
    }
    if hints_present && meta.mode == Mode::Mock && meta.tier.is_competitive() {
        report.push(
            Severity::Critical,
            "mock_competitive_hints",
            format!("Mock mode in {} tier has hints", meta.tier),
        );
    }
    if meta.answer_included && meta.attempt_state != AttemptState::Review {
        report.push(
            Severity::Critical,
            "answer_outside_review",
            format!("Answer included during non-review state ({})", meta.attempt_state),
        );
    }

    let sections = &meta.context_sections;
    let hint_section = sections.contains(&ContextSection::Hints);
    if hint_section != hints_present {
        report.push(
            Severity::Critical,
            "hint_metadata_mismatch",
            format!(
                "Context hint section present={} but metadata reports {} hint(s)",
                hint_section, meta.hints_allowed
            ),
        );
    }
    if sections.contains(&ContextSection::Answer) && !meta.answer_included {
        report.push(
            Severity::Critical,
            "answer_metadata_mismatch",
            "Context contains an answer section but metadata reports none",
        );
    }
    if sections.contains(&ContextSection::Solution) && !meta.solution_included {
        report.push(
            Severity::Critical,
            "solution_metadata_mismatch",
            "Context contains solution steps but metadata reports none",
        );
    }
    for section in sections {
        if !components.context.lines().any(|line| line == section.heading()) {
            report.push(
                Severity::Error,
                "context_section_missing",
                format!(
                    "Metadata lists a '{}' section the context does not contain",
                    section.heading()
                ),
            );
        }
    }

    if meta.hints_allowed > meta.hints_in_source {
        report.push(
            Severity::Error,
            "hint_count_exceeds_source",
            format!(
                "{} hint(s) allowed but problem only has {}",
                meta.hints_allowed, meta.hints_in_source
            ),
        );
    }
    if result.flattened_text != components.flatten() {
        report.push(
            Severity::Error,
            "flattened_text_mismatch",
            "Flattened text does not match the prompt components",
        );
    }
    if result.chat_messages != components.chat_messages() {
        report.push(
            Severity::Error,
            "chat_messages_mismatch",
            "Chat messages do not match the prompt components",
        );
    }

    if meta.response_template_fallback {
        report.push(
            Severity::Warning,
            "response_template_fallback",
            format!("Response template for {} missing; safe default used", meta.attempt_state),
        );
    }
    if meta.student_level == "unknown" {
        report.push(Severity::Warning, "unknown_student_level", "Student level unknown");
    }

    report.valid = report.findings.iter().all(|f| f.severity == Severity::Warning);
    report
}
