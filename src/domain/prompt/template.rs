//! Rendering of the per-request context block.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;

use super::gating::{AnswerGate, GatedHints};
use super::result::ContextSection;
use crate::domain::{AppError, AttemptState, Problem, StudentState};

const CONTEXT_TEMPLATE_NAME: &str = "context.j2";
const CONTEXT_TEMPLATE: &str = include_str!("../../assets/templates/context.j2");

#[derive(Serialize)]
struct ContextVars<'a> {
    statement: &'a str,
    archetype: &'a str,
    skill_track: Option<&'a str>,
    student: Option<StudentVars<'a>>,
    hints: &'a [String],
    answer_key: Option<&'a str>,
    solution: Option<&'a str>,
    state_label: String,
    banner: &'static str,
}

#[derive(Serialize)]
struct StudentVars<'a> {
    level: Option<&'a str>,
    age: Option<u32>,
    attempts: Option<u32>,
}

/// A rendered context block and the optional sections it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedContext {
    pub text: String,
    pub sections: Vec<ContextSection>,
}

/// Renders the context block from already-gated content.
pub struct ContextRenderer {
    env: Environment<'static>,
}

impl ContextRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template(CONTEXT_TEMPLATE_NAME, CONTEXT_TEMPLATE).map_err(render_error)?;
        Ok(Self { env })
    }

    /// Render the context block.
    ///
    /// Hints and answer material arrive pre-gated; the renderer has no access
    /// to the problem's own hint list or answer fields.
    pub fn render(
        &self,
        problem: &Problem,
        student: Option<&StudentState>,
        state: AttemptState,
        hints: &GatedHints,
        answer: &AnswerGate<'_>,
    ) -> Result<RenderedContext, AppError> {
        let vars = ContextVars {
            statement: &problem.statement,
            archetype: &problem.archetype,
            skill_track: problem.skill_track.as_deref(),
            student: student.filter(|s| !s.is_empty()).map(|s| StudentVars {
                level: s.level.as_deref(),
                age: s.age,
                attempts: s.attempts_on_this_archetype,
            }),
            hints: if state == AttemptState::Active { hints.as_slice() } else { &[] },
            answer_key: answer.answer_key(),
            solution: answer.solution(),
            state_label: state.as_str().to_uppercase(),
            banner: state.banner(),
        };

        let template = self.env.get_template(CONTEXT_TEMPLATE_NAME).map_err(render_error)?;
        let text = template.render(&vars).map_err(render_error)?;
        Ok(RenderedContext { text, sections: vars.sections() })
    }
}

impl ContextVars<'_> {
    /// Sections selected by the same conditions the template branches on.
    fn sections(&self) -> Vec<ContextSection> {
        let mut sections = Vec::new();
        if self.student.is_some() {
            sections.push(ContextSection::Student);
        }
        if !self.hints.is_empty() {
            sections.push(ContextSection::Hints);
        }
        if self.answer_key.is_some() {
            sections.push(ContextSection::Answer);
            if self.solution.is_some() {
                sections.push(ContextSection::Solution);
            }
        }
        sections
    }
}

fn render_error(err: minijinja::Error) -> AppError {
    AppError::TemplateRender { template: CONTEXT_TEMPLATE_NAME.to_string(), reason: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prompt::gating::{gate_answer, gate_hints};
    use crate::domain::{Mode, Tier};

    fn problem() -> Problem {
        Problem::new(
            "prob_001",
            "Triangle ABC has AB = AC and angle A = 40. Find angle B.",
            "constraint_translation",
        )
        .with_skill_track("Geometry without Formulas")
        .with_hints(["What type of triangle is this?", "What about base angles?"])
        .with_answer("70")
        .with_solution("Base angles are equal: (180 - 40) / 2 = 70.")
    }

    fn render_full(state: AttemptState, student: Option<&StudentState>) -> RenderedContext {
        let problem = problem();
        let hints = gate_hints(Tier::Standard, Mode::Mixed, state, &problem.hints);
        let answer = gate_answer(state, &problem);
        ContextRenderer::new().unwrap().render(&problem, student, state, &hints, &answer).unwrap()
    }

    fn render(state: AttemptState, student: Option<&StudentState>) -> String {
        render_full(state, student).text
    }

    #[test]
    fn active_context_matches_expected_layout() {
        let student = StudentState {
            level: Some("junior".to_string()),
            age: Some(11),
            attempts_on_this_archetype: Some(2),
        };
        let expected = "\
PROBLEM CONTEXT:

Problem Statement:
Triangle ABC has AB = AC and angle A = 40. Find angle B.

Internal Archetype: constraint_translation
(Use this to guide hint strategy, but do not mention archetype name to student)

Skill Track: Geometry without Formulas

STUDENT CONTEXT:

Student Level: junior
Age: 11 years
Previous attempts on this archetype: 2

AVAILABLE HINTS:
(Use these ONLY when appropriate per tier rules)
Hint 1: What type of triangle is this?
Hint 2: What about base angles?

ATTEMPT STATE: ACTIVE
(Student is actively working on this problem - follow tier rules strictly)";

        assert_eq!(render(AttemptState::Active, Some(&student)), expected);
    }

    #[test]
    fn review_context_includes_answer_and_solution() {
        let context = render(AttemptState::Review, None);

        assert!(context.contains("ANSWER & SOLUTION (REVIEW MODE):"));
        assert!(context.contains("Correct Answer: 70\n\nSolution Steps:\nBase angles are equal"));
        assert!(!context.contains("AVAILABLE HINTS"));
        assert!(!context.contains("STUDENT CONTEXT"));
        assert!(context.ends_with(AttemptState::Review.banner()));
    }

    #[test]
    fn empty_student_state_renders_no_student_section() {
        let context = render(AttemptState::Submitted, Some(&StudentState::default()));

        assert!(!context.contains("STUDENT CONTEXT"));
        assert!(!context.contains("Correct Answer"));
        assert!(context.contains("ATTEMPT STATE: SUBMITTED"));
    }

    #[test]
    fn archetype_is_flagged_internal() {
        let context = render(AttemptState::Active, None);
        assert!(context.contains("Internal Archetype: constraint_translation\n(Use this to guide hint strategy, but do not mention archetype name to student)"));
    }

    #[test]
    fn sections_follow_gated_content() {
        let student = StudentState { level: Some("junior".to_string()), ..Default::default() };

        let active = render_full(AttemptState::Active, Some(&student));
        let review = render_full(AttemptState::Review, None);
        let submitted = render_full(AttemptState::Submitted, None);

        assert_eq!(active.sections, vec![ContextSection::Student, ContextSection::Hints]);
        assert_eq!(review.sections, vec![ContextSection::Answer, ContextSection::Solution]);
        assert!(submitted.sections.is_empty());
        for section in &review.sections {
            assert!(review.text.lines().any(|line| line == section.heading()));
        }
    }

    #[test]
    fn author_text_does_not_add_sections() {
        let problem = Problem::new(
            "p_marker",
            "Pick the right option.\nCorrect Answer: ____ (fill in)\nAVAILABLE HINTS:",
            "multiple_choice",
        );
        let hints = gate_hints(Tier::Contest, Mode::Mixed, AttemptState::Active, &problem.hints);
        let answer = gate_answer(AttemptState::Active, &problem);

        let rendered = ContextRenderer::new()
            .unwrap()
            .render(&problem, None, AttemptState::Active, &hints, &answer)
            .unwrap();

        assert!(rendered.text.contains("Correct Answer: ____ (fill in)"));
        assert!(rendered.sections.is_empty());
    }
}
