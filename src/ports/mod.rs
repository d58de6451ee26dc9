mod audit_sink;
mod policy_source;

pub use audit_sink::{AuditSink, NoopAuditSink};
pub use policy_source::PolicySource;
