use crate::config::AssetConfig;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

static URL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(['"]?([^'"\\)]+)['"]?\)"#).expect("url() pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceCheck {
    pub reference: String,
    pub resolved: PathBuf,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub stylesheet: PathBuf,
    pub references: Vec<ReferenceCheck>,
}

impl ValidationReport {
    pub fn missing(&self) -> impl Iterator<Item = &ReferenceCheck> {
        self.references.iter().filter(|check| !check.found)
    }

    pub fn missing_count(&self) -> usize {
        self.missing().count()
    }

    /// 沒有任何 url() 參照時也算通過
    pub fn passed(&self) -> bool {
        self.missing_count() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    StylesheetMissing { path: PathBuf },
    Unreadable { path: PathBuf, reason: String },
    Checked(ValidationReport),
}

impl ValidationOutcome {
    pub fn passed(&self) -> bool {
        match self {
            ValidationOutcome::Checked(report) => report.passed(),
            _ => false,
        }
    }
}

/// 依出現順序取出所有 url(...) 內的路徑
pub fn extract_references(css: &str) -> Vec<String> {
    URL_REFERENCE
        .captures_iter(css)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// 只處理 `.` 與 `..`，不追蹤符號連結
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

pub fn resolve_reference(reference: &str, stylesheet_dir: &Path, project_root: &Path) -> PathBuf {
    if reference.starts_with("../") {
        normalize(&stylesheet_dir.join(reference))
    } else {
        normalize(&project_root.join(reference))
    }
}

pub fn validate_assets(config: &AssetConfig) -> ValidationOutcome {
    let stylesheet = config.stylesheet_path();
    if !stylesheet.is_file() {
        tracing::debug!("Stylesheet not found at {}", stylesheet.display());
        return ValidationOutcome::StylesheetMissing { path: stylesheet };
    }

    let content = match std::fs::read_to_string(&stylesheet) {
        Ok(content) => content,
        Err(e) => {
            return ValidationOutcome::Unreadable {
                path: stylesheet,
                reason: e.to_string(),
            }
        }
    };

    let stylesheet_dir = stylesheet
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.project_root.clone());

    let references = extract_references(&content)
        .into_iter()
        .map(|reference| {
            let resolved = resolve_reference(&reference, &stylesheet_dir, &config.project_root);
            let found = resolved.exists();
            tracing::debug!("{} -> {} (found: {})", reference, resolved.display(), found);
            ReferenceCheck {
                reference,
                resolved,
                found,
            }
        })
        .collect();

    ValidationOutcome::Checked(ValidationReport {
        stylesheet,
        references,
    })
}
