//! Problem and student data supplied by the upstream data store.

use serde::{Deserialize, Serialize};

/// A practice problem as fetched for a single attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub statement: String,
    /// Internal archetype label; never surfaced to the student.
    pub archetype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_track: Option<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl Problem {
    pub fn new(
        id: impl Into<String>,
        statement: impl Into<String>,
        archetype: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            statement: statement.into(),
            archetype: archetype.into(),
            skill_track: None,
            hints: Vec::new(),
            answer_key: None,
            solution: None,
        }
    }

    pub fn with_skill_track(mut self, skill_track: impl Into<String>) -> Self {
        self.skill_track = Some(skill_track.into());
        self
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_answer(mut self, answer_key: impl Into<String>) -> Self {
        self.answer_key = Some(answer_key.into());
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }
}

/// Optional learner context attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempts_on_this_archetype: Option<u32>,
}

impl StudentState {
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.age.is_none() && self.attempts_on_this_archetype.is_none()
    }
}
