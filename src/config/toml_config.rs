use crate::config::{AssetConfig, ServerConfig, DEFAULT_CONFIG_FILE};
use crate::utils::error::{DevToolsError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `devtools.toml` 的內容，所有欄位都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DevToolsConfig {
    pub server: ServerConfig,
    pub assets: AssetConfig,
}

impl DevToolsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| DevToolsError::ConfigError {
            message: format!("Failed to read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DevToolsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 明確指定的設定檔必須存在；否則只在預設檔存在時才讀取
    /// 未指定檔案時，先找專案根目錄下的 devtools.toml，再找目前目錄
    pub fn load(explicit: Option<&Path>, project_root: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!("Loading configuration from: {}", path.display());
            return Self::from_file(path);
        }

        let candidates = project_root
            .map(|root| root.join(DEFAULT_CONFIG_FILE))
            .into_iter()
            .chain(std::iter::once(PathBuf::from(DEFAULT_CONFIG_FILE)));
        for default_path in candidates {
            if default_path.is_file() {
                tracing::debug!("Loading configuration from: {}", default_path.display());
                return Self::from_file(default_path);
            }
        }

        tracing::debug!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
        Ok(Self::default())
    }

    /// 替換環境變數 (例如 ${PROJECT_ROOT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DevToolsError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 同時套用到伺服器與資產工具
    pub fn set_project_root<P: AsRef<Path>>(&mut self, root: P) {
        let root = root.as_ref().to_path_buf();
        self.server.project_root = Some(root.clone());
        self.assets.project_root = root;
    }
}

impl Validate for DevToolsConfig {
    fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.assets.validate()
    }
}
