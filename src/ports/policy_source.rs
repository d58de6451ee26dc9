use tracing::info;

use crate::domain::{AppError, PolicyDocument, PolicySet};

/// Port for loading policy documents at startup.
pub trait PolicySource {
    /// Human-readable origin, used in logs and diagnostics.
    fn describe(&self) -> String;

    /// Read every policy document this source provides, in merge order.
    fn load_documents(&self) -> Result<Vec<PolicyDocument>, AppError>;

    /// Load and merge all documents into an immutable policy set.
    fn load_policy_set(&self) -> Result<PolicySet, AppError> {
        let documents = self.load_documents()?;
        let count = documents.len();
        let set = PolicySet::from_documents(documents)?;
        info!(source = %self.describe(), documents = count, "loaded policy set");
        Ok(set)
    }
}
