use crate::error::{Result, ValidationError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "openfed-validations.toml";

/// Validation policy and tool settings
///
/// Read from `openfed-validations.toml` in the project root when present.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// drush executable: name on PATH, absolute path, or path relative to the project root
    #[serde(default = "default_drush")]
    pub drush: String,

    /// Composer metadata file holding the openfed/openfed constraint
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// Minimum installed version for the 12.x checks to apply
    #[serde(default = "default_version_threshold")]
    pub version_threshold: String,

    #[serde(default = "default_deprecated_modules")]
    pub deprecated_modules: Vec<String>,

    #[serde(default = "default_deprecated_themes")]
    pub deprecated_themes: Vec<String>,

    /// Admin theme set in fix-mode before a deprecated admin theme is removed
    #[serde(default = "default_fallback_admin_theme")]
    pub fallback_admin_theme: String,

    /// Module whose presence triggers the template compatibility scan
    #[serde(default = "default_compat_module")]
    pub compat_module: String,

    /// Directories scanned for *.twig templates, relative to the project root
    #[serde(default = "default_scan_dirs")]
    pub scan_dirs: Vec<String>,

    /// Uninstall-then-re-check rounds before giving up (at least 1)
    #[serde(default = "default_remediation_retries")]
    pub remediation_retries: u32,

    /// Per-command timeout in seconds (0 = no timeout)
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
}

fn default_drush() -> String {
    "drush".to_string()
}

fn default_metadata_file() -> String {
    "composer.openfed.json".to_string()
}

fn default_version_threshold() -> String {
    "11.2".to_string()
}

fn default_deprecated_modules() -> Vec<String> {
    vec!["ofed_switcher".to_string(), "rdf".to_string()]
}

fn default_deprecated_themes() -> Vec<String> {
    vec!["openfed_admin".to_string(), "adminimal_theme".to_string()]
}

fn default_fallback_admin_theme() -> String {
    "kiso".to_string()
}

fn default_compat_module() -> String {
    "twig_tweak".to_string()
}

fn default_scan_dirs() -> Vec<String> {
    vec!["docroot/themes".to_string(), "config".to_string()]
}

fn default_remediation_retries() -> u32 {
    1
}

fn default_command_timeout_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drush: default_drush(),
            metadata_file: default_metadata_file(),
            version_threshold: default_version_threshold(),
            deprecated_modules: default_deprecated_modules(),
            deprecated_themes: default_deprecated_themes(),
            fallback_admin_theme: default_fallback_admin_theme(),
            compat_module: default_compat_module(),
            scan_dirs: default_scan_dirs(),
            remediation_retries: default_remediation_retries(),
            command_timeout_secs: default_command_timeout_secs(),
        }
    }
}

impl Config {
    /// Default config location inside a project root
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(DEFAULT_CONFIG_FILE)
    }

    /// Load from `path`, falling back to defaults when the file is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ValidationError::Config(format!("{}: {}", path.display(), e)))?;

        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.drush.trim().is_empty() {
            return Err(ValidationError::Config("drush must not be empty".to_string()));
        }
        if self.fallback_admin_theme.trim().is_empty() {
            return Err(ValidationError::Config(
                "fallback_admin_theme must not be empty".to_string(),
            ));
        }
        if self.remediation_retries == 0 {
            return Err(ValidationError::Config(
                "remediation_retries must be at least 1".to_string(),
            ));
        }
        if self.deprecated_themes.contains(&self.fallback_admin_theme) {
            return Err(ValidationError::Config(format!(
                "fallback_admin_theme '{}' is itself listed as deprecated",
                self.fallback_admin_theme
            )));
        }
        Ok(())
    }
}
