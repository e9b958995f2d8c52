use crate::error::{Result, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

pub const PACKAGE: &str = "openfed/openfed";

/// First version-looking token of a composer constraint, e.g. `11.2.0` in `~11.2.0`
static VERSION_TOKEN_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:[\d+\.?]+[a-zA-Z0-9-]*)").unwrap());

/// Outcome of checking the declared Openfed version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionGate {
    Applies { version: String },
    DevelopmentBuild { constraint: String },
    BelowThreshold { version: String },
}

/// Read the openfed/openfed constraint from the composer metadata file
pub fn read_constraint(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .map_err(|e| ValidationError::Metadata(format!("{}: {}", path.display(), e)))?;
    let json: Value = serde_json::from_str(&content)
        .map_err(|e| ValidationError::Metadata(format!("{}: {}", path.display(), e)))?;

    json.get("require")
        .and_then(|r| r.get(PACKAGE))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ValidationError::Metadata(format!(
                "{}: no require.\"{}\" entry",
                path.display(),
                PACKAGE
            ))
        })
}

pub fn extract_version(constraint: &str) -> Option<String> {
    VERSION_TOKEN_REGEX
        .find(constraint)
        .map(|m| m.as_str().trim_matches('.').to_string())
        .filter(|v| !v.is_empty())
}

/// Numeric component-wise comparison; missing components count as zero.
/// Anything after the leading digits of a component (`0-beta1`) is ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parts = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|p| {
                let digits: String = p.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            })
            .collect()
    };

    let (pa, pb) = (parts(a), parts(b));
    let len = pa.len().max(pb.len());
    for i in 0..len {
        let x = pa.get(i).copied().unwrap_or(0);
        let y = pb.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

pub fn evaluate(constraint: &str, threshold: &str) -> Result<VersionGate> {
    if constraint.contains("dev") {
        return Ok(VersionGate::DevelopmentBuild {
            constraint: constraint.to_string(),
        });
    }

    let version = extract_version(constraint).ok_or_else(|| {
        ValidationError::Metadata(format!("no version in constraint '{}'", constraint))
    })?;

    if compare_versions(&version, threshold) == Ordering::Less {
        Ok(VersionGate::BelowThreshold { version })
    } else {
        Ok(VersionGate::Applies { version })
    }
}

pub fn check_project_version(path: &Path, threshold: &str) -> Result<VersionGate> {
    let constraint = read_constraint(path)?;
    log::debug!("{} constraint: {}", PACKAGE, constraint);
    evaluate(&constraint, threshold)
}
