//! Lightweight summary of the gating decisions a request would produce.

use serde::{Deserialize, Serialize};

use super::gating::{gate_answer, gate_hints};
use crate::domain::policy::PolicyKey;
use crate::domain::{AssemblyRequest, AttemptState, Mode, Tier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSummary {
    pub tier: Tier,
    pub mode: Mode,
    pub attempt_state: AttemptState,
    pub problem_id: String,
    pub archetype: String,
    pub student_level: String,
    pub hints_in_source: usize,
    pub hints_allowed: usize,
    pub answer_included: bool,
    pub prompt_assembly_order: Vec<String>,
}

/// Summarize a request without rendering or touching policies.
pub fn summarize(request: &AssemblyRequest) -> PromptSummary {
    let problem = &request.problem;
    let hints = gate_hints(request.tier, request.mode, request.attempt_state, &problem.hints);
    let answer = gate_answer(request.attempt_state, problem);

    PromptSummary {
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
        prompt_assembly_order: vec![
            PolicyKey::System.name(),
            PolicyKey::Tier(request.tier).name(),
            PolicyKey::Mode(request.mode).name(),
            PolicyKey::ResponseTemplate(request.attempt_state).name(),
            "context".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StudentState;
    use crate::testing::sample_problem;

    #[test]
    fn summary_counts_source_and_gated_hints() {
        let request =
            AssemblyRequest::new(Tier::Contest, Mode::Mock, AttemptState::Active, sample_problem());
        let summary = summarize(&request);

        assert_eq!(summary.hints_in_source, 3);
        assert_eq!(summary.hints_allowed, 0);
        assert!(!summary.answer_included);
        assert_eq!(summary.student_level, "unknown");
    }

    #[test]
    fn summary_lists_assembly_order() {
        let request =
            AssemblyRequest::new(Tier::Standard, Mode::Mixed, AttemptState::Review, sample_problem())
                .with_student(StudentState { level: Some("junior".into()), ..Default::default() });
        let summary = summarize(&request);

        assert_eq!(
            summary.prompt_assembly_order,
            vec!["system", "tier_standard_v1", "mode_mixed_v1", "review_v1", "context"]
        );
        assert!(summary.answer_included);
        assert_eq!(summary.student_level, "junior");
    }
}
