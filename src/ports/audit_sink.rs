use crate::domain::{AppError, AuditRecord};

/// Port for persisting audit records of assembled prompts.
pub trait AuditSink {
    fn record(&mut self, record: &AuditRecord) -> Result<(), AppError>;
}

/// Sink that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&mut self, _record: &AuditRecord) -> Result<(), AppError> {
        Ok(())
    }
}
