use crate::scan::Finding;
use thiserror::Error;

pub const TWIG_TWEAK_MIGRATION_GUIDE: &str =
    "https://git.drupalcode.org/project/twig_tweak/-/blob/3.x/docs/migration-to-3.x.md";

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("You can't proceed with Openfed update until you uninstall {module}. See Openfed 12 release notes.")]
    DeprecatedModule { module: String },

    #[error("You can't proceed with Openfed update until you uninstall {theme}. If you use {theme} as the administration theme, you have to manually change it before you are able to uninstall the theme. See Openfed 12 release notes.")]
    DeprecatedTheme { theme: String },

    #[error("In your theme, drupal_entity() or drupal_field() is used with the second argument as null or missing ({} occurrence(s)). Convert your theme to Twig Tweak 3.x before updating Openfed. See {}.", .findings.len(), TWIG_TWEAK_MIGRATION_GUIDE)]
    TwigTweakIncompatible { findings: Vec<Finding> },

    #[error("Remediation failed to converge: deprecated {kind}(s) still enabled: {}", .names.join(", "))]
    RemediationDidNotConverge { kind: &'static str, names: Vec<String> },

    #[error("Invalid project metadata: {0}")]
    Metadata(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command `{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Command `{command}` timed out after {secs}s")]
    CommandTimeout { command: String, secs: u64 },

    #[error("Unexpected output from `{command}`: {output}")]
    UnexpectedOutput { command: String, output: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
