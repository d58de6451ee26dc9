//! Audit records: which policies and gating decisions produced a model call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::prompt::AssemblyResult;
use crate::domain::validation::ValidationReport;
use crate::domain::{AttemptState, Mode, Tier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub recorded_at: DateTime<Utc>,
    pub problem_id: String,
    pub tier: Tier,
    pub mode: Mode,
    pub attempt_state: AttemptState,
    pub policy_keys: Vec<String>,
    pub hints_allowed: usize,
    pub answer_included: bool,
    pub solution_included: bool,
    pub response_template_fallback: bool,
    pub valid: bool,
    /// Codes of every validation finding, warnings included.
    pub findings: Vec<String>,
    /// SHA-256 of the flattened prompt text.
    pub prompt_sha256: String,
}

impl AuditRecord {
    pub fn new(
        result: &AssemblyResult,
        report: &ValidationReport,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        let meta = &result.metadata;
        Self {
            recorded_at,
            problem_id: meta.problem_id.clone(),
            tier: meta.tier,
            mode: meta.mode,
            attempt_state: meta.attempt_state,
            policy_keys: meta.policy_keys.clone(),
            hints_allowed: meta.hints_allowed,
            answer_included: meta.answer_included,
            solution_included: meta.solution_included,
            response_template_fallback: meta.response_template_fallback,
            valid: report.valid,
            findings: report.findings.iter().map(|f| f.code.clone()).collect(),
            prompt_sha256: hash_content(&result.flattened_text),
        }
    }
}

pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|byte| format!("{:02x}", byte)).collect()
}
