use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Serialization format of a policy document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyFormat {
    Toml,
    Json,
    Yaml,
}

impl PolicyFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<PolicyFormat> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(PolicyFormat::Toml),
            "json" => Some(PolicyFormat::Json),
            "yml" | "yaml" => Some(PolicyFormat::Yaml),
            _ => None,
        }
    }
}

/// One policy entry: ordered instruction lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyEntry {
    pub content: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Raw policy document keyed by policy key name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyDocument {
    pub entries: BTreeMap<String, PolicyEntry>,
}

impl PolicyDocument {
    /// Parse a document. `origin` names the source in error messages.
    pub fn parse(content: &str, format: PolicyFormat, origin: &str) -> Result<Self, AppError> {
        let what = format!("policy document {}", origin);
        match format {
            PolicyFormat::Toml => {
                toml::from_str(content).map_err(|err| AppError::parse_error(what, err))
            }
            PolicyFormat::Json => {
                serde_json::from_str(content).map_err(|err| AppError::parse_error(what, err))
            }
            PolicyFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|err| AppError::parse_error(what, err))
            }
        }
    }
}
