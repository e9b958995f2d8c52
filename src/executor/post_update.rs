use crate::error::Result;
use crate::site::SiteAdmin;
use std::sync::Arc;

pub const ALLOWED_FORMATS: &str = "allowed_formats";

/// Last post-update of allowed_formats; it moves its settings into core
pub const FORMATS_TO_CORE_UPDATE: &str = "allowed_formats_post_update_formats2core";

/// Uninstall allowed_formats once its settings migration to core has run.
///
/// Returns true when the module was uninstalled.
pub async fn disable_allowed_formats(site: Arc<dyn SiteAdmin>) -> Result<bool> {
    let executed = site.executed_post_updates().await?;
    if !executed.iter().any(|u| u == FORMATS_TO_CORE_UPDATE) {
        log::info!("{} has not run yet, keeping {}", FORMATS_TO_CORE_UPDATE, ALLOWED_FORMATS);
        return Ok(false);
    }

    if !site.is_module_enabled(ALLOWED_FORMATS).await? {
        log::debug!("{} already uninstalled", ALLOWED_FORMATS);
        return Ok(false);
    }

    log::info!("Uninstalling {}", ALLOWED_FORMATS);
    site.uninstall_module(ALLOWED_FORMATS).await?;
    Ok(true)
}
