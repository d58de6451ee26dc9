//! Policy inspection commands.

use clap::Subcommand;

use crate::app::api;
use crate::domain::{AppError, PolicySet};

#[derive(Subcommand)]
pub enum PolicyCommands {
    /// Report which policy keys are configured
    #[clap(visible_alias = "c")]
    Check,
    /// Print the text of one policy layer
    Show {
        /// Policy key, e.g. system, tier_contest_v1, mode_mock_v1, review_v1
        key: String,
    },
}

pub fn run_policies(policies: &PolicySet, command: PolicyCommands) -> Result<i32, AppError> {
    match command {
        PolicyCommands::Check => {
            let check = api::check_policies(policies);
            for key in &check.present {
                println!("  ✓ {}", key);
            }
            for key in &check.fallback {
                println!("  ~ {} (safe default)", key);
            }
            for key in &check.missing {
                println!("  ✗ {} (missing)", key);
            }

            if check.is_complete() {
                println!("✅ All required policies configured");
                Ok(0)
            } else {
                println!("❌ {} required policy key(s) missing", check.missing.len());
                Ok(1)
            }
        }
        PolicyCommands::Show { key } => {
            println!("{}", api::show_policy(policies, &key)?);
            Ok(0)
        }
    }
}
