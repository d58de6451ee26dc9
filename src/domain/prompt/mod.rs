//! Prompt assembly: gating, context rendering and layer composition.

mod engine;
mod gating;
mod result;
mod summary;
mod template;

pub use engine::{PromptEngine, SAFE_TEMPLATE_MARKER};
pub use gating::{AnswerGate, GatedHints, gate_answer, gate_hints, hints_permitted};
pub use result::{
    AssemblyMetadata, AssemblyResult, ChatMessage, ChatRole, ContextSection, LAYER_SEPARATOR,
    PromptComponents,
};
pub use summary::{PromptSummary, summarize};
pub use template::RenderedContext;
