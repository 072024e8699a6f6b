use crate::config::ServerConfig;
use crate::domain::model::FileStatus;
use crate::utils::error::{DevToolsError, Result};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChecklist {
    pub entries: Vec<FileStatus>,
}

impl FileChecklist {
    pub fn missing(&self) -> impl Iterator<Item = &FileStatus> {
        self.entries.iter().filter(|entry| !entry.exists())
    }

    pub fn present_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.exists()).count()
    }
}

fn file_status(root: &Path, relative: &str) -> FileStatus {
    let full_path = root.join(relative);
    let size = std::fs::metadata(&full_path)
        .ok()
        .filter(|meta| meta.is_file())
        .map(|meta| meta.len());

    FileStatus {
        path: relative.to_string(),
        full_path,
        size,
    }
}

/// 入口頁面不存在時直接失敗，其餘檔案僅供參考
pub fn check_project_files(config: &ServerConfig) -> Result<FileChecklist> {
    let root = config.root_dir();

    let entry = file_status(&root, &config.entry_file);
    if !entry.exists() {
        let project_dir = std::fs::canonicalize(&root).unwrap_or_else(|_| root.clone());
        return Err(DevToolsError::MissingEntryFile {
            path: config.entry_file.clone(),
            project_dir: project_dir.display().to_string(),
        });
    }

    let entries = config
        .checklist
        .iter()
        .map(|relative| file_status(&root, relative))
        .collect::<Vec<_>>();

    for entry in entries.iter().filter(|e| !e.exists()) {
        tracing::debug!("Checklist file missing: {}", entry.path);
    }

    Ok(FileChecklist { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> ServerConfig {
        ServerConfig {
            project_root: Some(root.to_path_buf()),
            checklist: vec!["index.html".to_string(), "scripts/auth.js".to_string()],
            ..ServerConfig::default()
        }
    }

    #[test]
    fn test_missing_entry_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let result = check_project_files(&config_for(temp_dir.path()));

        match result {
            Err(DevToolsError::MissingEntryFile { path, .. }) => assert_eq!(path, "index.html"),
            other => panic!("expected MissingEntryFile, got {:?}", other),
        }
    }

    #[test]
    fn test_other_missing_files_are_advisory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("index.html"), "<html></html>").unwrap();

        let checklist = check_project_files(&config_for(temp_dir.path())).unwrap();

        assert_eq!(checklist.entries.len(), 2);
        assert_eq!(checklist.entries[0].size, Some(13));
        assert_eq!(checklist.present_count(), 1);
        let missing: Vec<&str> = checklist.missing().map(|e| e.path.as_str()).collect();
        assert_eq!(missing, vec!["scripts/auth.js"]);
    }

    #[test]
    fn test_directory_named_like_entry_does_not_count() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("index.html")).unwrap();

        assert!(check_project_files(&config_for(temp_dir.path())).is_err());
    }
}
