//! Use cases shared by the CLI and library callers.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use crate::app::AppContext;
use crate::domain::{
    AppError, AssemblyResult, AttemptState, AuditRecord, PolicyKey, PolicySet, PromptEngine,
    PromptSummary, RawAssemblyRequest, ValidationReport, summarize, validate,
};
use crate::ports::{AuditSink, PolicySource};

/// Load policies from a source and build an engine over them.
pub fn load_engine(source: &impl PolicySource) -> Result<PromptEngine, AppError> {
    let policies = source.load_policy_set()?;
    PromptEngine::new(Arc::new(policies))
}

/// A prompt that passed the pre-send gate.
#[derive(Debug, Clone)]
pub struct AssembleOutcome {
    pub result: AssemblyResult,
    pub report: ValidationReport,
}

/// Validate, assemble and gate a request, writing an audit record either way.
///
/// Returns [`AppError::UnsafePrompt`] when validation blocks the prompt; the
/// audit record for a blocked prompt is still written.
pub fn assemble<A: AuditSink>(
    ctx: &mut AppContext<A>,
    raw: &RawAssemblyRequest,
) -> Result<AssembleOutcome, AppError> {
    let request = raw.validate()?;
    let result = ctx.engine().assemble(&request)?;
    let report = validate(&result);

    let record = AuditRecord::new(&result, &report, Utc::now());
    ctx.audit_mut().record(&record)?;

    if !report.valid {
        warn!(problem_id = %request.problem.id, "prompt blocked by validation");
        return Err(AppError::UnsafePrompt(report.blocking_summary()));
    }
    Ok(AssembleOutcome { result, report })
}

/// Run the validator over a stored result document.
pub fn validate_result_json(content: &str) -> Result<ValidationReport, AppError> {
    let result: AssemblyResult = serde_json::from_str(content)
        .map_err(|err| AppError::parse_error("assembly result", err))?;
    Ok(validate(&result))
}

/// Summarize the gating decisions a request would produce.
pub fn summarize_request(raw: &RawAssemblyRequest) -> Result<PromptSummary, AppError> {
    let request = raw.validate()?;
    Ok(summarize(&request))
}

/// Configuration status of every policy key.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyCheck {
    pub present: Vec<String>,
    pub missing: Vec<String>,
    /// Response templates that will fall back to the safe default.
    pub fallback: Vec<String>,
}

impl PolicyCheck {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_policies(policies: &PolicySet) -> PolicyCheck {
    let mut check = PolicyCheck { present: Vec::new(), missing: Vec::new(), fallback: Vec::new() };
    for key in PolicyKey::all() {
        match (policies.get(key).is_some(), key.is_required()) {
            (true, _) => check.present.push(key.name()),
            (false, true) => check.missing.push(key.name()),
            (false, false) => check.fallback.push(key.name()),
        }
    }
    check
}

/// Text of one policy layer, resolving response templates through the fallback.
pub fn show_policy(policies: &PolicySet, name: &str) -> Result<String, AppError> {
    let key = PolicyKey::parse(name).ok_or_else(|| AppError::UnknownPolicyKey(name.to_string()))?;
    match key {
        PolicyKey::ResponseTemplate(state) => Ok(response_template_text(policies, state)),
        _ => Ok(policies.require(key)?.text()),
    }
}

fn response_template_text(policies: &PolicySet, state: AttemptState) -> String {
    policies.response_template(state).policy.text()
}
