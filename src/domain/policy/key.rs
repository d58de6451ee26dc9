use std::fmt;

use crate::domain::{AttemptState, Mode, Tier};

const POLICY_VERSION: &str = "v1";

/// Identifies one policy layer.
///
/// String keys only exist at the load boundary; everything past it resolves
/// layers through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PolicyKey {
    System,
    Tier(Tier),
    Mode(Mode),
    ResponseTemplate(AttemptState),
}

impl PolicyKey {
    /// Every key in assembly order: system, tiers, modes, response templates.
    pub fn all() -> Vec<PolicyKey> {
        let mut keys = vec![PolicyKey::System];
        keys.extend(Tier::ALL.into_iter().map(PolicyKey::Tier));
        keys.extend(Mode::ALL.into_iter().map(PolicyKey::Mode));
        keys.extend(AttemptState::ALL.into_iter().map(PolicyKey::ResponseTemplate));
        keys
    }

    /// Key name as it appears in policy documents.
    pub fn name(&self) -> String {
        match self {
            PolicyKey::System => "system".to_string(),
            PolicyKey::Tier(tier) => format!("tier_{}_{}", tier.as_str(), POLICY_VERSION),
            PolicyKey::Mode(mode) => format!("mode_{}_{}", mode.as_str(), POLICY_VERSION),
            PolicyKey::ResponseTemplate(state) => format!("{}_{}", state.as_str(), POLICY_VERSION),
        }
    }

    pub fn parse(name: &str) -> Option<PolicyKey> {
        PolicyKey::all().into_iter().find(|key| key.name() == name)
    }

    /// Response templates have an embedded fallback; every other layer must be configured.
    pub fn is_required(&self) -> bool {
        !matches!(self, PolicyKey::ResponseTemplate(_))
    }
}

impl fmt::Display for PolicyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
