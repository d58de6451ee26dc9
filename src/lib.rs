//! lpc: tier, mode and attempt-state gated prompt assembly for tutoring sessions.
//!
//! A request names the session tier, the practice mode and where the student
//! is in their attempt. The engine stacks the configured policy layers, renders
//! a context block whose hints and answer are gated by those three values, and
//! hands the result to [`validate`] before it may be sent.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::api::{AssembleOutcome, PolicyCheck};
pub use domain::{
    AppError, AssemblyRequest, AssemblyResult, AttemptState, AuditRecord, Finding, Mode, Policy,
    PolicyKey, PolicySet, Problem, PromptEngine, PromptSummary, RawAssemblyRequest, Severity,
    StudentState, Tier, ValidationReport, summarize, validate,
};

use ports::NoopAuditSink;
use services::EmbeddedPolicySource;

/// Engine over the policies embedded in the binary.
pub fn default_engine() -> Result<PromptEngine, AppError> {
    app::api::load_engine(&EmbeddedPolicySource::new())
}

/// Assemble a request JSON document with the embedded policies.
///
/// The result has passed validation; a blocked prompt is returned as
/// [`AppError::UnsafePrompt`]. No audit record is written.
pub fn assemble_json(request_json: &str) -> Result<AssembleOutcome, AppError> {
    let raw = RawAssemblyRequest::from_json(request_json)?;
    let mut ctx = AppContext::new(default_engine()?, NoopAuditSink);
    app::api::assemble(&mut ctx, &raw)
}
