pub mod audit;
pub mod error;
pub mod policy;
mod problem;
pub mod prompt;
mod request;
mod session;
pub mod validation;

pub use audit::AuditRecord;
pub use error::AppError;
pub use policy::{NON_DISCLOSURE_DIRECTIVE, Policy, PolicyDocument, PolicyKey, PolicySet};
pub use problem::{Problem, StudentState};
pub use prompt::{AssemblyResult, PromptEngine, PromptSummary, summarize};
pub use request::{AssemblyRequest, RawAssemblyRequest};
pub use session::{AttemptState, Mode, Tier};
pub use validation::{Finding, Severity, ValidationReport, validate};
