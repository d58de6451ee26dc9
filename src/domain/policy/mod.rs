//! Policy layers: the instruction text that frames every assembled prompt.

mod document;
mod key;
mod set;

pub use document::{PolicyDocument, PolicyEntry, PolicyFormat};
pub use key::PolicyKey;
pub use set::{Policy, PolicySet, ResolvedTemplate};

/// Directive the system layer must carry for a prompt to be sendable.
pub const NON_DISCLOSURE_DIRECTIVE: &str = "Never reveal the final answer";
