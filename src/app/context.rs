use crate::domain::PromptEngine;
use crate::ports::AuditSink;

/// Application context holding dependencies for command execution.
pub struct AppContext<A: AuditSink> {
    engine: PromptEngine,
    audit: A,
}

impl<A: AuditSink> AppContext<A> {
    pub fn new(engine: PromptEngine, audit: A) -> Self {
        Self { engine, audit }
    }

    pub fn engine(&self) -> &PromptEngine {
        &self.engine
    }

    pub fn audit_mut(&mut self) -> &mut A {
        &mut self.audit
    }
}
