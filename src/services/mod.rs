mod audit_log_jsonl;
mod embedded_policy_source;
mod filesystem_policy_source;

pub use audit_log_jsonl::JsonlAuditLog;
pub use embedded_policy_source::EmbeddedPolicySource;
pub use filesystem_policy_source::FilesystemPolicySource;
