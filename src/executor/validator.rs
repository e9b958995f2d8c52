use crate::config::Config;
use crate::error::{Result, ValidationError};
use crate::scan::TemplateScanner;
use crate::site::SiteAdmin;
use crate::version::{self, VersionGate};
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments of one validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Remediate violations instead of only reporting them
    pub fix: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotBootstrapped,
    DevelopmentBuild { constraint: String },
    BelowThreshold { version: String, threshold: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Nothing to validate on this project
    Skipped(SkipReason),
    /// All checks passed; lists what fix-mode uninstalled
    Passed { remediated: Vec<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Extension {
    Module,
    Theme,
}

impl Extension {
    fn kind(self) -> &'static str {
        match self {
            Extension::Module => "module",
            Extension::Theme => "theme",
        }
    }

    fn blocked(self, name: &str) -> ValidationError {
        match self {
            Extension::Module => ValidationError::DeprecatedModule {
                module: name.to_string(),
            },
            Extension::Theme => ValidationError::DeprecatedTheme {
                theme: name.to_string(),
            },
        }
    }
}

/// Gates the Openfed 12 upgrade on the state of the live site.
pub struct UpdateValidator {
    site: Arc<dyn SiteAdmin>,
    config: Config,
    root: PathBuf,
}

impl UpdateValidator {
    pub fn new(site: Arc<dyn SiteAdmin>, config: Config, root: PathBuf) -> Self {
        Self { site, config, root }
    }

    pub async fn validate_update(&self, options: ValidationOptions) -> Result<ValidationOutcome> {
        // Fresh installs have no site to inspect
        if !self.site.is_bootstrapped().await? {
            log::info!("No bootstrapped Drupal site found, skipping validation");
            return Ok(ValidationOutcome::Skipped(SkipReason::NotBootstrapped));
        }

        if let Some(reason) = self.check_project_version()? {
            return Ok(ValidationOutcome::Skipped(reason));
        }

        let mut remediated = Vec::new();
        remediated.extend(self.check_deprecated_modules(options).await?);
        remediated.extend(self.check_deprecated_themes(options).await?);
        self.check_twig_tweak_compatibility().await?;

        self.site.rebuild_cache().await?;

        Ok(ValidationOutcome::Passed { remediated })
    }

    fn check_project_version(&self) -> Result<Option<SkipReason>> {
        let metadata = self.root.join(&self.config.metadata_file);
        let threshold = &self.config.version_threshold;

        match version::check_project_version(&metadata, threshold)? {
            VersionGate::Applies { version } => {
                log::debug!("Openfed {} >= {}, running checks", version, threshold);
                Ok(None)
            }
            VersionGate::DevelopmentBuild { constraint } => {
                log::info!("Development constraint '{}', skipping validation", constraint);
                Ok(Some(SkipReason::DevelopmentBuild { constraint }))
            }
            VersionGate::BelowThreshold { version } => {
                log::info!("Openfed {} is below {}, skipping validation", version, threshold);
                Ok(Some(SkipReason::BelowThreshold {
                    version,
                    threshold: threshold.clone(),
                }))
            }
        }
    }

    pub async fn check_deprecated_modules(&self, options: ValidationOptions) -> Result<Vec<String>> {
        self.remove_deprecated(Extension::Module, &self.config.deprecated_modules, options)
            .await
    }

    pub async fn check_deprecated_themes(&self, options: ValidationOptions) -> Result<Vec<String>> {
        if options.fix {
            self.release_admin_theme().await?;
        }
        self.remove_deprecated(Extension::Theme, &self.config.deprecated_themes, options)
            .await
    }

    /// An admin theme in use cannot be uninstalled, so switch to the fallback first
    async fn release_admin_theme(&self) -> Result<()> {
        let Some(current) = self.site.admin_theme().await? else {
            return Ok(());
        };

        if self.config.deprecated_themes.contains(&current) {
            log::warn!(
                "Admin theme {} is deprecated, switching to {}",
                current,
                self.config.fallback_admin_theme
            );
            self.site
                .set_admin_theme(&self.config.fallback_admin_theme)
                .await?;
        }
        Ok(())
    }

    async fn enabled_among(&self, names: &[String]) -> Result<Vec<String>> {
        let mut enabled = Vec::new();
        for name in names {
            if self.site.is_module_enabled(name).await? {
                enabled.push(name.clone());
            }
        }
        Ok(enabled)
    }

    /// Fails on the first enabled name, or in fix-mode uninstalls then
    /// re-checks. Gives up once `remediation_retries` rounds still leave
    /// something enabled.
    async fn remove_deprecated(
        &self,
        ext: Extension,
        names: &[String],
        options: ValidationOptions,
    ) -> Result<Vec<String>> {
        let mut remediated: Vec<String> = Vec::new();
        let mut attempt = 0;

        if !options.fix {
            for name in names {
                if self.site.is_module_enabled(name).await? {
                    return Err(ext.blocked(name));
                }
            }
            return Ok(remediated);
        }

        loop {
            let enabled = self.enabled_among(names).await?;
            if enabled.is_empty() {
                return Ok(remediated);
            }

            if attempt >= self.config.remediation_retries {
                return Err(ValidationError::RemediationDidNotConverge {
                    kind: ext.kind(),
                    names: enabled,
                });
            }

            for name in &enabled {
                log::info!("Uninstalling deprecated {} {}", ext.kind(), name);
                match ext {
                    Extension::Module => self.site.uninstall_module(name).await?,
                    Extension::Theme => self.site.uninstall_theme(name).await?,
                }
                if !remediated.contains(name) {
                    remediated.push(name.clone());
                }
            }

            attempt += 1;
        }
    }

    async fn check_twig_tweak_compatibility(&self) -> Result<()> {
        if !self.site.is_module_enabled(&self.config.compat_module).await? {
            return Ok(());
        }

        let roots = self
            .config
            .scan_dirs
            .iter()
            .map(|dir| self.root.join(dir))
            .collect();
        let findings = TemplateScanner::new(roots).scan();

        if findings.is_empty() {
            return Ok(());
        }

        for finding in &findings {
            log::warn!("Incompatible Twig Tweak call: {}", finding);
        }
        Err(ValidationError::TwigTweakIncompatible { findings })
    }
}
