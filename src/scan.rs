use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// `drupal_entity('node')`, `drupal_field("x", null)`: calls whose second
/// argument Twig Tweak 3.x no longer defaults.
static ENTITY_FIELD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)drupal_(entity|field)\(['"]([^,]*)['"](,\s*null)?\)"#).unwrap()
});

const TEMPLATE_EXTENSION: &str = "twig";

/// One incompatible call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: PathBuf,
    pub line: usize,
    pub snippet: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path.display(), self.line, self.snippet)
    }
}

/// Scans template directories for Twig Tweak 2.x only call forms
pub struct TemplateScanner {
    roots: Vec<PathBuf>,
}

impl TemplateScanner {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn scan(&self) -> Vec<Finding> {
        let mut findings = Vec::new();

        for root in &self.roots {
            if !root.is_dir() {
                log::debug!("Skipping missing template dir {}", root.display());
                continue;
            }

            for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                if !entry.file_type().is_file() || !is_template(path) {
                    continue;
                }

                // Binary or unreadable files cannot hold template code
                let Ok(content) = fs::read_to_string(path) else {
                    log::debug!("Unreadable template {}", path.display());
                    continue;
                };

                findings.extend(scan_text(path, &content));
            }
        }

        findings
    }
}

fn is_template(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(TEMPLATE_EXTENSION)
}

pub fn scan_text(path: &Path, content: &str) -> Vec<Finding> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            ENTITY_FIELD_REGEX.find(line).map(|m| Finding {
                path: path.to_path_buf(),
                line: idx + 1,
                snippet: m.as_str().to_string(),
            })
        })
        .collect()
}
