#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::{OrganizeRule, PageInfo};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use toml_config::DevToolsConfig;

pub const DEFAULT_CONFIG_FILE: &str = "devtools.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub fallback_ports: Vec<u16>,
    pub url_path: String,
    pub open_browser: bool,
    pub browser_delay_secs: u64,
    pub project_root: Option<PathBuf>,
    pub entry_file: String,
    pub checklist: Vec<String>,
    pub pages: Vec<PageInfo>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8000,
            fallback_ports: vec![8001, 8002, 8003, 8080, 3000],
            // 首頁 index.html 會顯示開場畫面
            url_path: "/".to_string(),
            open_browser: true,
            browser_delay_secs: 2,
            project_root: None,
            entry_file: "index.html".to_string(),
            checklist: [
                "index.html",
                "src/landing.html",
                "src/homepage.html",
                "src/game.html",
                "assets/css/pixel-styles.css",
                "assets/css/game-styles.css",
                "scripts/auth.js",
                "scripts/script.js",
                "scripts/questions.js",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            pages: vec![
                PageInfo::new("/", "Splash screen (auto-redirects)"),
                PageInfo::new("/landing.html", "Landing page for new users"),
                PageInfo::new("/homepage.html", "User dashboard (requires login)"),
                PageInfo::new("/game.html", "Quiz game (requires login)"),
            ],
        }
    }
}

impl ServerConfig {
    /// 伺服器實際提供檔案的根目錄
    pub fn root_dir(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn browser_delay(&self) -> Duration {
        Duration::from_secs(self.browser_delay_secs)
    }

    /// 瀏覽器網址使用的主機名稱
    pub fn display_host(&self) -> String {
        if self.host.is_loopback() {
            "localhost".to_string()
        } else {
            self.host.to_string()
        }
    }

    pub fn server_url(&self, port: u16) -> String {
        format!("http://{}:{}", self.display_host(), port)
    }

    pub fn game_url(&self, port: u16) -> String {
        format!("{}{}", self.server_url(port), self.url_path)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_ports("server.port", &[self.port])?;
        validation::validate_ports("server.fallback_ports", &self.fallback_ports)?;
        validation::validate_path("server.entry_file", &self.entry_file)?;
        for file in &self.checklist {
            validation::validate_path("server.checklist", file)?;
        }
        if !self.url_path.starts_with('/') {
            return Err(crate::utils::error::DevToolsError::InvalidConfigValueError {
                field: "server.url_path".to_string(),
                value: self.url_path.clone(),
                reason: "URL path must start with '/'".to_string(),
            });
        }
        validation::validate_url("server.url_path", &self.game_url(self.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub project_root: PathBuf,
    pub stylesheet: PathBuf,
    pub guide: PathBuf,
    pub asset_root: PathBuf,
    pub image_extensions: Vec<String>,
    /// 依序比對，第一個符合的規則勝出
    pub rules: Vec<OrganizeRule>,
    pub default_folder: String,
    pub expected_folders: Vec<String>,
    pub placeholder_marker: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            stylesheet: PathBuf::from("assets/css/figma/homepage-design.css"),
            guide: PathBuf::from("assets/figma-integration-guide.md"),
            asset_root: PathBuf::from("assets/images/figma"),
            image_extensions: vec!["png".to_string(), "svg".to_string()],
            rules: vec![
                OrganizeRule::new("icon", "icons"),
                OrganizeRule::new("button", "buttons"),
                OrganizeRule::new("bg", "backgrounds"),
                OrganizeRule::new("background", "backgrounds"),
                OrganizeRule::new("sprite", "sprites"),
                OrganizeRule::new("card", "ui-elements"),
                OrganizeRule::new("ui", "ui-elements"),
            ],
            default_folder: "ui-elements".to_string(),
            expected_folders: ["backgrounds", "buttons", "icons", "sprites", "ui-elements"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            placeholder_marker: "Replace with your Figma colors".to_string(),
        }
    }
}

impl AssetConfig {
    /// 以指定專案根目錄建立預設設定
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        Self {
            project_root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.project_root.join(&self.stylesheet)
    }

    pub fn guide_path(&self) -> PathBuf {
        self.project_root.join(&self.guide)
    }

    pub fn asset_root_path(&self) -> PathBuf {
        self.project_root.join(&self.asset_root)
    }
}

impl Validate for AssetConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("assets.stylesheet", &self.stylesheet.to_string_lossy())?;
        validation::validate_path("assets.guide", &self.guide.to_string_lossy())?;
        validation::validate_path("assets.asset_root", &self.asset_root.to_string_lossy())?;
        validation::validate_extensions("assets.image_extensions", &self.image_extensions)?;
        validation::validate_folder_name("assets.default_folder", &self.default_folder)?;
        for rule in &self.rules {
            validation::validate_non_empty_string("assets.rules.pattern", &rule.pattern)?;
            validation::validate_folder_name("assets.rules.folder", &rule.folder)?;
        }
        for folder in &self.expected_folders {
            validation::validate_folder_name("assets.expected_folders", folder)?;
        }
        validation::validate_non_empty_string(
            "assets.placeholder_marker",
            &self.placeholder_marker,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.fallback_ports, vec![8001, 8002, 8003, 8080, 3000]);
        assert_eq!(config.game_url(8000), "http://localhost:8000/");
        assert_eq!(config.browser_delay(), Duration::from_secs(2));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_rules_keep_priority_order() {
        let config = AssetConfig::default();
        let patterns: Vec<&str> = config.rules.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(
            patterns,
            vec!["icon", "button", "bg", "background", "sprite", "card", "ui"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_asset_paths_are_relative_to_root() {
        let config = AssetConfig::with_root("/project");
        assert_eq!(
            config.asset_root_path(),
            PathBuf::from("/project/assets/images/figma")
        );
        assert_eq!(
            config.stylesheet_path(),
            PathBuf::from("/project/assets/css/figma/homepage-design.css")
        );
    }

    #[test]
    fn test_url_path_must_be_absolute() {
        let config = ServerConfig {
            url_path: "game.html".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
