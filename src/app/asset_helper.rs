use crate::app::report;
use crate::config::AssetConfig;
use crate::core::asset_organizer::organize_assets;
use crate::core::asset_status::asset_status;
use crate::core::asset_validator::validate_assets;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCommand {
    Validate,
    Organize,
    Status,
}

impl AssetCommand {
    /// 不分大小寫
    pub fn parse_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "validate" => Some(AssetCommand::Validate),
            "organize" => Some(AssetCommand::Organize),
            "status" => Some(AssetCommand::Status),
            _ => None,
        }
    }
}

pub fn help_banner() -> String {
    [
        "🎨 Figma Asset Helper",
        "=".repeat(30).as_str(),
        "Commands:",
        "  asset-helper validate",
        "  asset-helper organize",
        "  asset-helper status",
    ]
    .join("\n")
}

pub fn unknown_command_help() -> String {
    [
        "Unknown command. Available commands:",
        "  validate  - Check if all CSS assets exist",
        "  organize  - Move assets to proper subfolders",
        "  status    - Show integration status",
    ]
    .join("\n")
}

pub fn execute(command: AssetCommand, config: &AssetConfig) -> String {
    tracing::debug!("Running asset command {:?}", command);
    match command {
        AssetCommand::Validate => report::render_validation(&validate_assets(config)),
        AssetCommand::Organize => report::render_organize(&organize_assets(config)),
        AssetCommand::Status => report::render_status(&asset_status(config)),
    }
}

/// 未知或缺少指令時只印出說明，不會動到任何檔案
pub fn run_asset_command(command: Option<&str>, config: &AssetConfig) -> String {
    match command {
        None => help_banner(),
        Some(name) => match AssetCommand::parse_name(name) {
            Some(command) => execute(command, config),
            None => {
                tracing::debug!("Unknown asset command: {}", name);
                unknown_command_help()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_is_case_insensitive() {
        assert_eq!(AssetCommand::parse_name("validate"), Some(AssetCommand::Validate));
        assert_eq!(AssetCommand::parse_name("ORGANIZE"), Some(AssetCommand::Organize));
        assert_eq!(AssetCommand::parse_name("Status"), Some(AssetCommand::Status));
        assert_eq!(AssetCommand::parse_name("deploy"), None);
        assert_eq!(AssetCommand::parse_name(""), None);
    }

    #[test]
    fn test_no_command_prints_banner() {
        let output = run_asset_command(None, &AssetConfig::default());
        assert!(output.contains("Figma Asset Helper"));
        assert!(output.contains("asset-helper organize"));
    }

    #[test]
    fn test_unknown_command_prints_listing() {
        let output = run_asset_command(Some("explode"), &AssetConfig::default());
        assert!(output.starts_with("Unknown command."));
        assert!(output.contains("validate  - Check if all CSS assets exist"));
    }
}
