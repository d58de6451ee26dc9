use std::path::Path;

use include_dir::{Dir, DirEntry, include_dir};

use crate::domain::policy::PolicyFormat;
use crate::domain::{AppError, PolicyDocument};
use crate::ports::PolicySource;

static POLICY_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/policies");

/// Default policies compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedPolicySource;

impl EmbeddedPolicySource {
    pub fn new() -> Self {
        Self
    }
}

impl PolicySource for EmbeddedPolicySource {
    fn describe(&self) -> String {
        "embedded defaults".to_string()
    }

    fn load_documents(&self) -> Result<Vec<PolicyDocument>, AppError> {
        let mut files = Vec::new();
        collect_files(&POLICY_DIR, &mut files);
        files.sort_by(|a, b| a.0.cmp(b.0));

        files
            .into_iter()
            .filter_map(|(path, content)| {
                PolicyFormat::from_path(path).map(|format| (path, content, format))
            })
            .map(|(path, content, format)| {
                PolicyDocument::parse(content, format, &path.display().to_string())
            })
            .collect()
    }
}

fn collect_files(dir: &'static Dir, files: &mut Vec<(&'static Path, &'static str)>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                if let Some(content) = file.contents_utf8() {
                    files.push((file.path(), content));
                }
            }
            DirEntry::Dir(subdir) => collect_files(subdir, files),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NON_DISCLOSURE_DIRECTIVE, PolicyKey};

    #[test]
    fn embedded_policies_are_complete() {
        let set = EmbeddedPolicySource::new().load_policy_set().unwrap();

        assert!(set.missing_keys().is_empty());
        for key in PolicyKey::all() {
            assert!(set.get(key).is_some(), "{} should be embedded", key);
        }
    }

    #[test]
    fn embedded_system_policy_carries_directive() {
        let set = EmbeddedPolicySource::new().load_policy_set().unwrap();
        let system = set.require(PolicyKey::System).unwrap();

        assert!(system.text().contains(NON_DISCLOSURE_DIRECTIVE));
    }
}
