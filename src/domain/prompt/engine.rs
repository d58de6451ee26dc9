//! The prompt assembly engine.
//!
//! Assembly order is fixed: system policy, tier policy, mode policy, response
//! template, then the context block. Gating runs before the context is
//! rendered, and metadata is read from the same gated values.

use std::sync::Arc;

use tracing::{debug, warn};

use super::gating::{gate_answer, gate_hints};
use super::result::{AssemblyMetadata, AssemblyResult, PromptComponents};
use super::template::ContextRenderer;
use crate::domain::policy::{PolicyKey, PolicySet};
use crate::domain::validation::{ValidationReport, validate};
use crate::domain::{AppError, AssemblyRequest, RawAssemblyRequest};

/// Marker recorded in `policy_keys` when the safe default template was used.
pub const SAFE_TEMPLATE_MARKER: &str = "response_template_safe_default";

/// Stateless assembler over an immutable policy set.
///
/// Cloning is cheap and clones share the same policies.
#[derive(Clone)]
pub struct PromptEngine {
    policies: Arc<PolicySet>,
    renderer: Arc<ContextRenderer>,
}

impl PromptEngine {
    pub fn new(policies: Arc<PolicySet>) -> Result<Self, AppError> {
        Ok(Self { policies, renderer: Arc::new(ContextRenderer::new()?) })
    }

    pub fn policies(&self) -> &PolicySet {
        &self.policies
    }

    /// Validate an untyped request, then assemble it.
    pub fn assemble_raw(&self, raw: &RawAssemblyRequest) -> Result<AssemblyResult, AppError> {
        let request = raw.validate()?;
        self.assemble(&request)
    }

    /// Assemble a prompt. Pure: identical requests yield identical results.
    pub fn assemble(&self, request: &AssemblyRequest) -> Result<AssemblyResult, AppError> {
        let problem = &request.problem;
        debug!(
            tier = %request.tier,
            mode = %request.mode,
            attempt_state = %request.attempt_state,
            problem_id = %problem.id,
            "assembling prompt"
        );

        let system_key = PolicyKey::System;
        let tier_key = PolicyKey::Tier(request.tier);
        let mode_key = PolicyKey::Mode(request.mode);
        let template_key = PolicyKey::ResponseTemplate(request.attempt_state);

        let system = self.policies.require(system_key)?;
        let tier_policy = self.policies.require(tier_key)?;
        let mode_policy = self.policies.require(mode_key)?;
        let template = self.policies.response_template(request.attempt_state);
        if template.fallback {
            warn!(key = %template_key, "response template not configured; using safe default");
        }

        let hints = gate_hints(request.tier, request.mode, request.attempt_state, &problem.hints);
        let answer = gate_answer(request.attempt_state, problem);

        let context = self.renderer.render(
            problem,
            request.student_state.as_ref(),
            request.attempt_state,
            &hints,
            &answer,
        )?;

        let components = PromptComponents {
            system: system.text(),
            developer: vec![tier_policy.text(), mode_policy.text()],
            response_template: template.policy.text(),
            context: context.text,
        };

        let template_name =
            if template.fallback { SAFE_TEMPLATE_MARKER.to_string() } else { template_key.name() };
        let metadata = AssemblyMetadata {
            tier: request.tier,
            mode: request.mode,
            attempt_state: request.attempt_state,
            problem_id: problem.id.clone(),
            archetype: problem.archetype.clone(),
            student_level: request
                .student_state
                .as_ref()
                .and_then(|s| s.level.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            hints_in_source: problem.hints.len(),
            hints_allowed: hints.len(),
            answer_included: answer.is_disclosed(),
            solution_included: answer.solution().is_some(),
            response_template_fallback: template.fallback,
            context_sections: context.sections,
            policy_keys: vec![system_key.name(), tier_key.name(), mode_key.name(), template_name],
        };

        debug!(
            hints_allowed = metadata.hints_allowed,
            answer_included = metadata.answer_included,
            "prompt assembled"
        );

        Ok(AssemblyResult {
            flattened_text: components.flatten(),
            chat_messages: components.chat_messages(),
            components,
            metadata,
        })
    }

    /// Assemble and run the pre-send validation gate.
    ///
    /// Fails with [`AppError::UnsafePrompt`] when the report has any blocking
    /// finding; otherwise returns the result with its report.
    pub fn assemble_checked(
        &self,
        request: &AssemblyRequest,
    ) -> Result<(AssemblyResult, ValidationReport), AppError> {
        let result = self.assemble(request)?;
        let report = validate(&result);
        for finding in &report.findings {
            debug!(severity = %finding.severity, code = %finding.code, "{}", finding.message);
        }
        if !report.valid {
            warn!(problem_id = %request.problem.id, "assembled prompt rejected by validation");
            return Err(AppError::UnsafePrompt(report.blocking_summary()));
        }
        Ok((result, report))
    }
}
