//! Assembly requests: the untyped wire shape and its validated form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{AppError, AttemptState, Mode, Problem, StudentState, Tier};

/// Request as received from a caller, before any validation.
///
/// Every field is optional here so that a missing field surfaces as a
/// validation error naming that field rather than as an opaque parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAssemblyRequest {
    #[serde(default)]
    pub tier: Option<Value>,
    #[serde(default)]
    pub mode: Option<Value>,
    #[serde(default)]
    pub attempt_state: Option<Value>,
    #[serde(default)]
    pub problem: Option<Value>,
    #[serde(default)]
    pub student_state: Option<Value>,
}

impl RawAssemblyRequest {
    /// Parse a request from JSON text.
    pub fn from_json(content: &str) -> Result<Self, AppError> {
        serde_json::from_str(content).map_err(|err| AppError::parse_error("assembly request", err))
    }

    /// Validate every field and produce a typed request.
    ///
    /// `attempt_state` is checked first, then `tier`, `mode`, `problem` and
    /// `student_state`. Nothing else runs until all checks pass.
    pub fn validate(&self) -> Result<AssemblyRequest, AppError> {
        let attempt_state = parse_field(
            "attempt_state",
            self.attempt_state.as_ref(),
            AttemptState::parse,
            AttemptState::legal_values,
        )?;
        let tier = parse_field("tier", self.tier.as_ref(), Tier::parse, Tier::legal_values)?;
        let mode = parse_field("mode", self.mode.as_ref(), Mode::parse, Mode::legal_values)?;

        let problem = match &self.problem {
            None | Some(Value::Null) => {
                return Err(AppError::missing("problem", PROBLEM_SHAPE));
            }
            Some(value) => Problem::deserialize(value).map_err(|err| AppError::Validation {
                field: "problem",
                value: err.to_string(),
                expected: PROBLEM_SHAPE.to_string(),
            })?,
        };

        let student_state = match &self.student_state {
            None | Some(Value::Null) => None,
            Some(value) => Some(StudentState::deserialize(value).map_err(|err| {
                AppError::Validation {
                    field: "student_state",
                    value: err.to_string(),
                    expected: STUDENT_SHAPE.to_string(),
                }
            })?),
        };

        Ok(AssemblyRequest { tier, mode, attempt_state, problem, student_state })
    }
}

const PROBLEM_SHAPE: &str =
    "an object with id, statement, archetype and optional skill_track, hints, answer_key, solution";
const STUDENT_SHAPE: &str = "an object with optional level, age, attempts_on_this_archetype";

/// Parse an enumerated field. Absent, null and blank values count as missing;
/// any non-string value is reported as invalid under the field's name.
fn parse_field<T>(
    field: &'static str,
    raw: Option<&Value>,
    parse: impl Fn(&str) -> Option<T>,
    legal: impl Fn() -> String,
) -> Result<T, AppError> {
    let invalid = |value: String| AppError::Validation { field, value, expected: legal() };
    match raw {
        None | Some(Value::Null) => Err(AppError::missing(field, legal())),
        Some(Value::String(text)) => match text.trim() {
            "" => Err(AppError::missing(field, legal())),
            value => parse(value).ok_or_else(|| invalid(value.to_string())),
        },
        Some(other) => Err(invalid(other.to_string())),
    }
}

/// A fully validated request, ready for policy resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyRequest {
    pub tier: Tier,
    pub mode: Mode,
    pub attempt_state: AttemptState,
    pub problem: Problem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_state: Option<StudentState>,
}

impl AssemblyRequest {
    pub fn new(tier: Tier, mode: Mode, attempt_state: AttemptState, problem: Problem) -> Self {
        Self { tier, mode, attempt_state, problem, student_state: None }
    }

    pub fn with_student(mut self, student_state: StudentState) -> Self {
        self.student_state = Some(student_state);
        self
    }
}
