use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::{AppError, AuditRecord};
use crate::ports::AuditSink;

/// Appends one JSON object per line to an audit log file.
#[derive(Debug, Clone)]
pub struct JsonlAuditLog {
    path: PathBuf,
}

impl JsonlAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AuditSink for JsonlAuditLog {
    fn record(&mut self, record: &AuditRecord) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(record)
            .map_err(|err| AppError::parse_error("audit record", err))?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        debug!(path = %self.path.display(), problem_id = %record.problem_id, "audit record written");
        Ok(())
    }
}
