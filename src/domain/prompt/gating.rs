//! Content gating: decides which hints and answer material may reach a prompt.

use crate::domain::{AttemptState, Mode, Problem, Tier};

/// Hints that survived gating.
///
/// Only [`gate_hints`] produces this type, so context rendering can never be
/// handed an unfiltered hint list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatedHints(Vec<String>);

impl GatedHints {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether any hint may be shown for this tier, mode and attempt state.
pub fn hints_permitted(tier: Tier, mode: Mode, state: AttemptState) -> bool {
    if state != AttemptState::Active {
        return false;
    }
    if tier.is_competitive() {
        return false;
    }
    if mode == Mode::Mock && tier.is_competitive() {
        return false;
    }
    true
}

pub fn gate_hints(tier: Tier, mode: Mode, state: AttemptState, hints: &[String]) -> GatedHints {
    if hints_permitted(tier, mode, state) {
        GatedHints(hints.to_vec())
    } else {
        GatedHints::default()
    }
}

/// Answer material released for an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerGate<'a> {
    Withheld,
    Disclosed { answer_key: Option<&'a str>, solution: Option<&'a str> },
}

impl<'a> AnswerGate<'a> {
    pub fn is_disclosed(&self) -> bool {
        matches!(self, AnswerGate::Disclosed { .. })
    }

    /// The answer key, when one is released and present.
    pub fn answer_key(&self) -> Option<&'a str> {
        match self {
            AnswerGate::Disclosed { answer_key, .. } => *answer_key,
            AnswerGate::Withheld => None,
        }
    }

    /// Solution steps are only shown alongside an answer key.
    pub fn solution(&self) -> Option<&'a str> {
        match self {
            AnswerGate::Disclosed { answer_key: Some(_), solution } => *solution,
            _ => None,
        }
    }
}

/// Answers are released only once the attempt is under review.
pub fn gate_answer(state: AttemptState, problem: &Problem) -> AnswerGate<'_> {
    match state {
        AttemptState::Review => AnswerGate::Disclosed {
            answer_key: problem.answer_key.as_deref(),
            solution: problem.solution.as_deref(),
        },
        AttemptState::Active | AttemptState::Submitted => AnswerGate::Withheld,
    }
}
