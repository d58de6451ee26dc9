use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::policy::PolicyFormat;
use crate::domain::{AppError, PolicyDocument};
use crate::ports::PolicySource;

/// Policies read from a single document or a directory of documents.
///
/// Directory entries are read in lexical order; files without a recognized
/// extension are skipped.
#[derive(Debug, Clone)]
pub struct FilesystemPolicySource {
    path: PathBuf,
}

impl FilesystemPolicySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_document(path: &Path) -> Result<PolicyDocument, AppError> {
        let format = PolicyFormat::from_path(path).ok_or_else(|| {
            AppError::config_error(format!(
                "Unsupported policy file '{}': expected .toml, .json, .yml or .yaml",
                path.display()
            ))
        })?;
        let content = fs::read_to_string(path)?;
        PolicyDocument::parse(&content, format, &path.display().to_string())
    }
}

impl PolicySource for FilesystemPolicySource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_documents(&self) -> Result<Vec<PolicyDocument>, AppError> {
        if !self.path.exists() {
            return Err(AppError::config_error(format!(
                "Policy path not found: {}",
                self.path.display()
            )));
        }

        if self.path.is_file() {
            return Ok(vec![Self::read_document(&self.path)?]);
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if PolicyFormat::from_path(&path).is_none() {
                debug!(path = %path.display(), "skipping non-policy file");
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        if paths.is_empty() {
            return Err(AppError::config_error(format!(
                "No policy documents found in {}",
                self.path.display()
            )));
        }

        paths.iter().map(|path| Self::read_document(path)).collect()
    }
}
