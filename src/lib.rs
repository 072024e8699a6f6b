pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{AssetConfig, DevToolsConfig, ServerConfig};
pub use crate::core::server::DevServer;
pub use utils::error::{DevToolsError, Result};
