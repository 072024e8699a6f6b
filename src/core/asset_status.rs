use crate::config::AssetConfig;
use crate::core::asset_validator::{validate_assets, ValidationOutcome};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderCount {
    pub name: String,
    pub files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub folders: Vec<FolderCount>,
    pub customized: bool,
    pub validation: ValidationOutcome,
}

impl StatusReport {
    pub fn total_assets(&self) -> usize {
        self.folders.iter().map(|f| f.files).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    SetupIncomplete { missing: Vec<PathBuf> },
    Ready(StatusReport),
}

/// 隱藏檔 (例如 .gitkeep) 不算資產；資料夾不存在時視為 0
pub fn count_visible_files(folder: &Path) -> usize {
    let Ok(entries) = fs::read_dir(folder) else {
        return 0;
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
        .count()
}

pub fn asset_status(config: &AssetConfig) -> StatusOutcome {
    let stylesheet = config.stylesheet_path();
    let guide = config.guide_path();

    let missing: Vec<PathBuf> = [&stylesheet, &guide]
        .into_iter()
        .filter(|path| !path.is_file())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return StatusOutcome::SetupIncomplete { missing };
    }

    let asset_root = config.asset_root_path();
    let folders = config
        .expected_folders
        .iter()
        .map(|name| FolderCount {
            name: name.clone(),
            files: count_visible_files(&asset_root.join(name)),
        })
        .collect();

    let customized = match fs::read_to_string(&stylesheet) {
        Ok(content) => !content.contains(&config.placeholder_marker),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", stylesheet.display(), e);
            false
        }
    };

    StatusOutcome::Ready(StatusReport {
        folders,
        customized,
        validation: validate_assets(config),
    })
}
