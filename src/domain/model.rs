use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 檔名子字串 → 目的子資料夾
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeRule {
    pub pattern: String,
    pub folder: String,
}

impl OrganizeRule {
    pub fn new(pattern: &str, folder: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            folder: folder.to_string(),
        }
    }

    pub fn matches(&self, lowercase_name: &str) -> bool {
        lowercase_name.contains(&self.pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub path: String,
    pub description: String,
}

impl PageInfo {
    pub fn new(path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            description: description.to_string(),
        }
    }
}

/// 啟動檢查清單中的單一檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: String,
    pub full_path: PathBuf,
    pub size: Option<u64>,
}

impl FileStatus {
    pub fn exists(&self) -> bool {
        self.size.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerPhase {
    NotStarted,
    CheckingFiles,
    PortSelected,
    Bound,
    Serving,
    Stopped,
    Aborted,
}

impl ServerPhase {
    pub fn can_transition_to(self, next: ServerPhase) -> bool {
        use ServerPhase::*;
        matches!(
            (self, next),
            (NotStarted, CheckingFiles)
                | (CheckingFiles, PortSelected)
                | (PortSelected, Bound)
                | (Bound, Serving)
                | (Serving, Stopped)
                | (CheckingFiles | PortSelected | Bound | Serving, Aborted)
        )
    }
}
