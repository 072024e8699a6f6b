use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevToolsError {
    #[error("Required entry file not found: {path}")]
    MissingEntryFile { path: String, project_dir: String },

    #[error("No port available: {message}")]
    PortExhausted { message: String },

    #[error("Permission denied on port {port}")]
    PermissionDenied { port: u16 },

    #[error("Server error: {message}")]
    ServerError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Setup,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DevToolsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DevToolsError::MissingEntryFile { .. } => ErrorCategory::Setup,
            DevToolsError::PortExhausted { .. }
            | DevToolsError::PermissionDenied { .. }
            | DevToolsError::ServerError { .. } => ErrorCategory::Network,
            DevToolsError::ConfigError { .. }
            | DevToolsError::ConfigValidationError { .. }
            | DevToolsError::InvalidConfigValueError { .. }
            | DevToolsError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DevToolsError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            ErrorCategory::Setup | ErrorCategory::Configuration | ErrorCategory::Network => {
                ErrorSeverity::High
            }
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            DevToolsError::MissingEntryFile { .. } => {
                "Make sure you're running this from the project directory (or pass --root)."
                    .to_string()
            }
            DevToolsError::PortExhausted { .. } => {
                "Close other local servers or pass --port with a free port.".to_string()
            }
            DevToolsError::PermissionDenied { .. } => {
                "Try running as administrator or use a different port.".to_string()
            }
            DevToolsError::ServerError { .. } => {
                "Check that no other process is using the port and try again.".to_string()
            }
            DevToolsError::IoError(_) => {
                "Check file permissions and available disk space.".to_string()
            }
            DevToolsError::ConfigError { .. } => {
                "Make sure the config file exists and is valid TOML format.".to_string()
            }
            DevToolsError::ConfigValidationError { field, .. }
            | DevToolsError::InvalidConfigValueError { field, .. }
            | DevToolsError::MissingConfigError { field } => {
                format!("Fix the '{}' setting in your config file.", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DevToolsError::MissingEntryFile { path, project_dir } => format!(
                "Error: {} not found! Current directory: {}",
                path, project_dir
            ),
            DevToolsError::PortExhausted { message } => {
                format!("Error finding available port: {}", message)
            }
            DevToolsError::PermissionDenied { port } => {
                format!("Permission denied on port {}", port)
            }
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DevToolsError>;
