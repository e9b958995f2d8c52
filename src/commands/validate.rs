use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::executor::{SkipReason, UpdateValidator, ValidationOptions, ValidationOutcome};
use crate::site::SiteAdmin;
use colored::*;
use std::path::Path;
use std::sync::Arc;

/// Validate the project at `root` for the Openfed 12 update
pub async fn run_validate(
    site: Arc<dyn SiteAdmin>,
    config: Config,
    root: &Path,
    args: &ValidateArgs,
) -> Result<()> {
    let options = ValidationOptions {
        fix: args.fix_mode(),
    };
    if options.fix {
        eprintln!("{} fix-mode: deprecated extensions will be uninstalled", "[FIX]".yellow().bold());
    }

    let validator = UpdateValidator::new(site, config, root.to_path_buf());

    match validator.validate_update(options).await? {
        ValidationOutcome::Skipped(reason) => {
            let why = match reason {
                SkipReason::NotBootstrapped => "no bootstrapped Drupal site".to_string(),
                SkipReason::DevelopmentBuild { constraint } => {
                    format!("development constraint {}", constraint)
                }
                SkipReason::BelowThreshold { version, threshold } => {
                    format!("Openfed {} is below {}", version, threshold)
                }
            };
            eprintln!("{} Nothing to validate: {}", "[SKIP]".cyan(), why);
        }
        ValidationOutcome::Passed { remediated } => {
            for name in &remediated {
                eprintln!("{} Uninstalled {}", "[FIX]".yellow(), name);
            }
            eprintln!("{} Site is ready for the Openfed 12 update", "[OK]".green().bold());
        }
    }

    Ok(())
}
