use crate::config::AssetConfig;
use crate::domain::model::OrganizeRule;
use std::fs;
use std::path::{Path, PathBuf};

/// 有序規則表，第一個符合的規則決定目的資料夾
#[derive(Debug, Clone)]
pub struct OrganizeRules<'a> {
    rules: &'a [OrganizeRule],
    default_folder: &'a str,
}

impl<'a> OrganizeRules<'a> {
    pub fn new(rules: &'a [OrganizeRule], default_folder: &'a str) -> Self {
        Self {
            rules,
            default_folder,
        }
    }

    pub fn from_config(config: &'a AssetConfig) -> Self {
        Self::new(&config.rules, &config.default_folder)
    }

    /// 回傳 (資料夾, 是否使用預設)
    pub fn classify(&self, file_name: &str) -> (&'a str, bool) {
        let lowercase = file_name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowercase))
            .map(|rule| (rule.folder.as_str(), false))
            .unwrap_or((self.default_folder, true))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveStatus {
    Moved,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMove {
    pub file_name: String,
    pub folder: String,
    pub by_default: bool,
    pub status: MoveStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrganizeOutcome {
    RootMissing { path: PathBuf },
    NothingToOrganize { path: PathBuf },
    ScanFailed { path: PathBuf, reason: String },
    Organized(Vec<AssetMove>),
}

impl OrganizeOutcome {
    pub fn moved_count(&self) -> usize {
        match self {
            OrganizeOutcome::Organized(moves) => moves
                .iter()
                .filter(|m| m.status == MoveStatus::Moved)
                .count(),
            _ => 0,
        }
    }

    pub fn failed_count(&self) -> usize {
        match self {
            OrganizeOutcome::Organized(moves) => moves
                .iter()
                .filter(|m| matches!(m.status, MoveStatus::Failed(_)))
                .count(),
            _ => 0,
        }
    }
}

fn has_image_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// 只列出根目錄底下的圖片檔，不進入子資料夾
pub fn discover_assets(root: &Path, extensions: &[String]) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && has_image_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn move_into(file: &Path, destination_dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(destination_dir)?;
    let file_name = file
        .file_name()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name"))?;
    let destination = destination_dir.join(file_name);
    if destination.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists", destination.display()),
        ));
    }
    fs::rename(file, destination)
}

pub fn organize_assets(config: &AssetConfig) -> OrganizeOutcome {
    let root = config.asset_root_path();
    if !root.is_dir() {
        return OrganizeOutcome::RootMissing { path: root };
    }

    // 掃描只做一次，移動過的檔案不會再被看到
    let files = match discover_assets(&root, &config.image_extensions) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("Failed to scan {}: {}", root.display(), e);
            return OrganizeOutcome::ScanFailed {
                path: root,
                reason: e.to_string(),
            };
        }
    };

    if files.is_empty() {
        return OrganizeOutcome::NothingToOrganize { path: root };
    }

    let rules = OrganizeRules::from_config(config);
    let moves = files
        .iter()
        .map(|file| {
            let file_name = file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let (folder, by_default) = rules.classify(&file_name);

            let status = match move_into(file, &root.join(folder)) {
                Ok(()) => {
                    tracing::debug!("Moved {} -> {}/", file_name, folder);
                    MoveStatus::Moved
                }
                Err(e) => {
                    tracing::warn!("Failed to move {}: {}", file_name, e);
                    MoveStatus::Failed(e.to_string())
                }
            };

            AssetMove {
                file_name,
                folder: folder.to_string(),
                by_default,
                status,
            }
        })
        .collect();

    OrganizeOutcome::Organized(moves)
}
