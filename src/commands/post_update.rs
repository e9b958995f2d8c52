use crate::error::Result;
use crate::executor::post_update::{disable_allowed_formats, ALLOWED_FORMATS};
use crate::site::SiteAdmin;
use colored::*;
use std::sync::Arc;

pub async fn run_post_update(site: Arc<dyn SiteAdmin>) -> Result<()> {
    if !site.is_bootstrapped().await? {
        eprintln!("{} No bootstrapped Drupal site", "[SKIP]".cyan());
        return Ok(());
    }

    if disable_allowed_formats(site).await? {
        eprintln!("{} Uninstalled {}", "[OK]".green().bold(), ALLOWED_FORMATS);
    } else {
        eprintln!("{} Nothing to do", "[OK]".green());
    }
    Ok(())
}
