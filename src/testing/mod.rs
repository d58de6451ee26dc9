//! Shared fixtures for unit tests.

use std::sync::{Arc, OnceLock};

use crate::domain::{
    AppError, AssemblyRequest, AssemblyResult, AttemptState, AuditRecord, Mode, Policy, PolicyKey,
    PolicySet, Problem, PromptEngine, Tier,
};
use crate::ports::{AuditSink, PolicySource};
use crate::services::EmbeddedPolicySource;

/// The isosceles-triangle problem with three hints, an answer and a solution.
pub fn sample_problem() -> Problem {
    Problem::new(
        "prob_001",
        "Triangle ABC has AB = AC and angle A = 40 degrees. Find angle B.",
        "constraint_translation",
    )
    .with_skill_track("Geometry without Formulas")
    .with_hints([
        "What type of triangle is this?",
        "In an isosceles triangle, what about base angles?",
        "If angle A = 40 degrees, how much is left for base angles?",
    ])
    .with_answer("70 degrees")
    .with_solution("AB = AC, so angles B and C are equal. B = C = (180 - 40) / 2 = 70.")
}

/// Complete policy set with one short marker line per layer.
pub fn minimal_policies() -> PolicySet {
    let mut policies = PolicySet::default();
    let mut insert = |key: PolicyKey, line: String| {
        policies.insert(key, Policy::new([line])).expect("fixture keys are unique");
    };
    insert(PolicyKey::System, "SYSTEM: Never reveal the final answer.".to_string());
    for tier in Tier::ALL {
        insert(PolicyKey::Tier(tier), format!("TIER {}", tier));
    }
    for mode in Mode::ALL {
        insert(PolicyKey::Mode(mode), format!("MODE {}", mode));
    }
    for state in AttemptState::ALL {
        insert(PolicyKey::ResponseTemplate(state), format!("TEMPLATE {}", state));
    }
    policies
}

pub fn embedded_policies() -> Arc<PolicySet> {
    static POLICIES: OnceLock<Arc<PolicySet>> = OnceLock::new();
    POLICIES
        .get_or_init(|| {
            Arc::new(EmbeddedPolicySource::new().load_policy_set().expect("embedded policies load"))
        })
        .clone()
}

pub fn embedded_engine() -> PromptEngine {
    PromptEngine::new(embedded_policies()).expect("context template compiles")
}

/// Assemble with the embedded policies, panicking on failure.
pub fn assembled(request: &AssemblyRequest) -> AssemblyResult {
    embedded_engine().assemble(request).expect("assembly succeeds")
}

/// Audit sink that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    pub records: Vec<AuditRecord>,
}

impl AuditSink for MemoryAuditSink {
    fn record(&mut self, record: &AuditRecord) -> Result<(), AppError> {
        self.records.push(record.clone());
        Ok(())
    }
}
