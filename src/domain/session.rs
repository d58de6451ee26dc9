//! Session dimensions that drive gating: difficulty tier, training mode, attempt state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty band governing strictness of hint policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Warmup,
    Standard,
    Challenge,
    Contest,
    Elite,
}

impl Tier {
    /// All tiers in ascending difficulty.
    pub const ALL: [Tier; 5] =
        [Tier::Warmup, Tier::Standard, Tier::Challenge, Tier::Contest, Tier::Elite];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Warmup => "warmup",
            Tier::Standard => "standard",
            Tier::Challenge => "challenge",
            Tier::Contest => "contest",
            Tier::Elite => "elite",
        }
    }

    pub fn parse(name: &str) -> Option<Tier> {
        Tier::ALL.into_iter().find(|tier| tier.as_str() == name)
    }

    /// Contest and elite never receive hints during an active attempt.
    pub fn is_competitive(&self) -> bool {
        matches!(self, Tier::Contest | Tier::Elite)
    }

    pub fn legal_values() -> String {
        join_names(Tier::ALL.iter().map(Tier::as_str))
    }
}

/// Session context modulating hint availability independent of tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Bootcamp,
    Mixed,
    Mock,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Bootcamp, Mode::Mixed, Mode::Mock];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bootcamp => "bootcamp",
            Mode::Mixed => "mixed",
            Mode::Mock => "mock",
        }
    }

    pub fn parse(name: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|mode| mode.as_str() == name)
    }

    pub fn legal_values() -> String {
        join_names(Mode::ALL.iter().map(Mode::as_str))
    }
}

/// Lifecycle stage of a single problem attempt.
///
/// Transitions (`active` -> `submitted` -> `review`) belong to the caller; the
/// engine renders whichever state it is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptState {
    Active,
    Submitted,
    Review,
}

impl AttemptState {
    pub const ALL: [AttemptState; 3] =
        [AttemptState::Active, AttemptState::Submitted, AttemptState::Review];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptState::Active => "active",
            AttemptState::Submitted => "submitted",
            AttemptState::Review => "review",
        }
    }

    pub fn parse(name: &str) -> Option<AttemptState> {
        AttemptState::ALL.into_iter().find(|state| state.as_str() == name)
    }

    pub fn legal_values() -> String {
        join_names(AttemptState::ALL.iter().map(AttemptState::as_str))
    }

    /// Fixed explanation printed under the `ATTEMPT STATE` banner.
    pub fn banner(&self) -> &'static str {
        match self {
            AttemptState::Active => {
                "(Student is actively working on this problem - follow tier rules strictly)"
            }
            AttemptState::Submitted => {
                "(Student has submitted - you may acknowledge but wait for review mode for full explanation)"
            }
            AttemptState::Review => {
                "(Review mode - provide complete explanation with answer and solution)"
            }
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AttemptState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip_through_parse() {
        for tier in Tier::ALL {
            assert_eq!(Tier::parse(tier.as_str()), Some(tier));
        }
        for mode in Mode::ALL {
            assert_eq!(Mode::parse(mode.as_str()), Some(mode));
        }
        for state in AttemptState::ALL {
            assert_eq!(AttemptState::parse(state.as_str()), Some(state));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(Tier::parse("Contest"), None);
        assert_eq!(AttemptState::parse("REVIEW"), None);
    }

    #[test]
    fn only_contest_and_elite_are_competitive() {
        let competitive: Vec<_> = Tier::ALL.into_iter().filter(Tier::is_competitive).collect();
        assert_eq!(competitive, vec![Tier::Contest, Tier::Elite]);
    }

    #[test]
    fn legal_values_list_every_name() {
        assert_eq!(Mode::legal_values(), "bootcamp, mixed, mock");
        assert_eq!(AttemptState::legal_values(), "active, submitted, review");
    }

    #[test]
    fn submitted_banner_asks_to_wait_for_review() {
        assert!(AttemptState::Submitted.banner().contains("acknowledge but wait for review"));
    }
}
