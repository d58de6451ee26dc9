//! Assembly output: layered components, flattened text, chat turns and metadata.

use serde::{Deserialize, Serialize};

use crate::domain::{AttemptState, Mode, Tier};

/// Separator placed between prompt layers.
pub const LAYER_SEPARATOR: &str = "\n\n";

/// The four policy layers plus the context block, kept separate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptComponents {
    pub system: String,
    /// Tier policy followed by mode policy.
    pub developer: Vec<String>,
    pub response_template: String,
    pub context: String,
}

impl PromptComponents {
    fn policy_layers(&self) -> Vec<&str> {
        let mut layers = vec![self.system.as_str()];
        layers.extend(self.developer.iter().map(String::as_str));
        layers.push(self.response_template.as_str());
        layers
    }

    /// All layers in assembly order as a single instruction string.
    pub fn flatten(&self) -> String {
        let mut layers = self.policy_layers();
        layers.push(self.context.as_str());
        layers.join(LAYER_SEPARATOR)
    }

    /// Policy layers as a system turn, context as a user turn.
    pub fn chat_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(ChatRole::System, self.policy_layers().join(LAYER_SEPARATOR)),
            ChatMessage::new(ChatRole::User, self.context.clone()),
        ]
    }
}

/// Role tag for structured model turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Optional section of the context block, as emitted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSection {
    Student,
    Hints,
    Answer,
    Solution,
}

impl ContextSection {
    /// Heading line the template writes for this section.
    pub fn heading(&self) -> &'static str {
        match self {
            ContextSection::Student => "STUDENT CONTEXT:",
            ContextSection::Hints => "AVAILABLE HINTS:",
            ContextSection::Answer => "ANSWER & SOLUTION (REVIEW MODE):",
            ContextSection::Solution => "Solution Steps:",
        }
    }
}

/// Gating decisions and provenance for one assembled prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    pub tier: Tier,
    pub mode: Mode,
    pub attempt_state: AttemptState,
    pub problem_id: String,
    pub archetype: String,
    pub student_level: String,
    /// Hints on the problem before gating.
    pub hints_in_source: usize,
    /// Hints that reached the context block.
    pub hints_allowed: usize,
    pub answer_included: bool,
    pub solution_included: bool,
    pub response_template_fallback: bool,
    /// Optional context sections the renderer emitted, in template order.
    pub context_sections: Vec<ContextSection>,
    /// Policy layers used, in assembly order.
    pub policy_keys: Vec<String>,
}

/// Everything needed to drive one model call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyResult {
    pub components: PromptComponents,
    pub flattened_text: String,
    pub chat_messages: Vec<ChatMessage>,
    pub metadata: AssemblyMetadata,
}
