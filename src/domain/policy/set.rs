use crate::domain::policy::{PolicyDocument, PolicyKey};
use crate::domain::{AppError, AttemptState, Mode, Tier};

/// Response template used when the configured template for a state is absent.
///
/// Active-attempt wording: no answer, no solution.
const SAFE_RESPONSE_TEMPLATE: &[&str] = &[
    "RESPONSE TEMPLATE (SAFE DEFAULT):",
    "- Keep every reply short and redirect the student to their own reasoning.",
    "- Do not state the final answer, and do not walk through solution steps.",
    "- Ask at most one guiding question per reply.",
];

/// One policy layer: ordered instruction lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    lines: Vec<String>,
}

impl Policy {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { lines: lines.into_iter().map(Into::into).collect() }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Layer text, one instruction per line.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// A response template chosen for an attempt state.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTemplate<'a> {
    pub policy: &'a Policy,
    /// True when the embedded safe default stood in for a missing template.
    pub fallback: bool,
}

#[derive(Debug, Clone, Default)]
struct TierPolicies {
    warmup: Option<Policy>,
    standard: Option<Policy>,
    challenge: Option<Policy>,
    contest: Option<Policy>,
    elite: Option<Policy>,
}

#[derive(Debug, Clone, Default)]
struct ModePolicies {
    bootcamp: Option<Policy>,
    mixed: Option<Policy>,
    mock: Option<Policy>,
}

#[derive(Debug, Clone, Default)]
struct ResponseTemplates {
    active: Option<Policy>,
    submitted: Option<Policy>,
    review: Option<Policy>,
}

/// Immutable policy configuration, built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct PolicySet {
    system: Option<Policy>,
    tiers: TierPolicies,
    modes: ModePolicies,
    response_templates: ResponseTemplates,
    safe_template: Policy,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self {
            system: None,
            tiers: TierPolicies::default(),
            modes: ModePolicies::default(),
            response_templates: ResponseTemplates::default(),
            safe_template: Policy::new(SAFE_RESPONSE_TEMPLATE.iter().copied()),
        }
    }
}

impl PolicySet {
    /// Build a set from documents, rejecting unknown and duplicate keys.
    pub fn from_documents<I>(documents: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = PolicyDocument>,
    {
        let mut set = PolicySet::default();
        for document in documents {
            for (name, entry) in document.entries {
                let key = PolicyKey::parse(&name).ok_or(AppError::UnknownPolicyKey(name))?;
                if entry.content.is_empty() {
                    return Err(AppError::config_error(format!("policy '{}' has no content", key)));
                }
                set.insert(key, Policy::new(entry.content))?;
            }
        }
        Ok(set)
    }

    /// Add a layer. A key may only be defined once.
    pub fn insert(&mut self, key: PolicyKey, policy: Policy) -> Result<(), AppError> {
        let slot = self.slot_mut(key);
        if slot.is_some() {
            return Err(AppError::config_error(format!("policy '{}' is defined twice", key)));
        }
        *slot = Some(policy);
        Ok(())
    }

    pub fn get(&self, key: PolicyKey) -> Option<&Policy> {
        match key {
            PolicyKey::System => self.system.as_ref(),
            PolicyKey::Tier(Tier::Warmup) => self.tiers.warmup.as_ref(),
            PolicyKey::Tier(Tier::Standard) => self.tiers.standard.as_ref(),
            PolicyKey::Tier(Tier::Challenge) => self.tiers.challenge.as_ref(),
            PolicyKey::Tier(Tier::Contest) => self.tiers.contest.as_ref(),
            PolicyKey::Tier(Tier::Elite) => self.tiers.elite.as_ref(),
            PolicyKey::Mode(Mode::Bootcamp) => self.modes.bootcamp.as_ref(),
            PolicyKey::Mode(Mode::Mixed) => self.modes.mixed.as_ref(),
            PolicyKey::Mode(Mode::Mock) => self.modes.mock.as_ref(),
            PolicyKey::ResponseTemplate(AttemptState::Active) => {
                self.response_templates.active.as_ref()
            }
            PolicyKey::ResponseTemplate(AttemptState::Submitted) => {
                self.response_templates.submitted.as_ref()
            }
            PolicyKey::ResponseTemplate(AttemptState::Review) => {
                self.response_templates.review.as_ref()
            }
        }
    }

    /// Look up a layer that must be configured.
    pub fn require(&self, key: PolicyKey) -> Result<&Policy, AppError> {
        self.get(key)
            .ok_or_else(|| AppError::config_error(format!("policy '{}' is not configured", key)))
    }

    /// Response template for a state, falling back to the safe default.
    pub fn response_template(&self, state: AttemptState) -> ResolvedTemplate<'_> {
        match self.get(PolicyKey::ResponseTemplate(state)) {
            Some(policy) => ResolvedTemplate { policy, fallback: false },
            None => ResolvedTemplate { policy: &self.safe_template, fallback: true },
        }
    }

    /// The embedded fallback response template.
    pub fn safe_template(&self) -> &Policy {
        &self.safe_template
    }

    /// Required keys with no configured layer.
    pub fn missing_keys(&self) -> Vec<PolicyKey> {
        PolicyKey::all()
            .into_iter()
            .filter(|key| key.is_required() && self.get(*key).is_none())
            .collect()
    }

    fn slot_mut(&mut self, key: PolicyKey) -> &mut Option<Policy> {
        match key {
            PolicyKey::System => &mut self.system,
            PolicyKey::Tier(Tier::Warmup) => &mut self.tiers.warmup,
            PolicyKey::Tier(Tier::Standard) => &mut self.tiers.standard,
            PolicyKey::Tier(Tier::Challenge) => &mut self.tiers.challenge,
            PolicyKey::Tier(Tier::Contest) => &mut self.tiers.contest,
            PolicyKey::Tier(Tier::Elite) => &mut self.tiers.elite,
            PolicyKey::Mode(Mode::Bootcamp) => &mut self.modes.bootcamp,
            PolicyKey::Mode(Mode::Mixed) => &mut self.modes.mixed,
            PolicyKey::Mode(Mode::Mock) => &mut self.modes.mock,
            PolicyKey::ResponseTemplate(AttemptState::Active) => &mut self.response_templates.active,
            PolicyKey::ResponseTemplate(AttemptState::Submitted) => {
                &mut self.response_templates.submitted
            }
            PolicyKey::ResponseTemplate(AttemptState::Review) => &mut self.response_templates.review,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::PolicyFormat;

    fn document(json: &str) -> PolicyDocument {
        PolicyDocument::parse(json, PolicyFormat::Json, "test").unwrap()
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = PolicySet::from_documents([document(r#"{"tier_legend_v1": {"content": ["x"]}}"#)])
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownPolicyKey(name) if name == "tier_legend_v1"));
    }

    #[test]
    fn duplicate_key_across_documents_is_rejected() {
        let err = PolicySet::from_documents([
            document(r#"{"system": {"content": ["a"]}}"#),
            document(r#"{"system": {"content": ["b"]}}"#),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn empty_content_is_a_configuration_error() {
        let err =
            PolicySet::from_documents([document(r#"{"mode_mixed_v1": {"content": []}}"#)])
                .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn require_reports_missing_key_by_name() {
        let set = PolicySet::default();
        let err = set.require(PolicyKey::Tier(Tier::Elite)).unwrap_err();
        assert!(err.to_string().contains("tier_elite_v1"));
    }

    #[test]
    fn missing_template_falls_back_to_safe_default() {
        let set = PolicySet::default();
        let resolved = set.response_template(AttemptState::Review);

        assert!(resolved.fallback);
        assert_eq!(resolved.policy, set.safe_template());
    }

    #[test]
    fn configured_template_is_used() {
        let set = PolicySet::from_documents([document(
            r#"{"review_v1": {"content": ["Explain fully."]}}"#,
        )])
        .unwrap();
        let resolved = set.response_template(AttemptState::Review);

        assert!(!resolved.fallback);
        assert_eq!(resolved.policy.text(), "Explain fully.");
    }

    #[test]
    fn safe_default_never_discloses() {
        let text = PolicySet::default().safe_template().text();

        assert!(text.contains("Do not state the final answer"));
        assert!(!text.contains("Correct Answer"));
    }

    #[test]
    fn missing_keys_lists_required_layers_only() {
        let set = PolicySet::from_documents([document(r#"{"system": {"content": ["s"]}}"#)])
            .unwrap();
        let missing = set.missing_keys();

        assert_eq!(missing.len(), 8);
        assert!(!missing.contains(&PolicyKey::System));
        assert!(!missing.iter().any(|key| matches!(key, PolicyKey::ResponseTemplate(_))));
    }
}
