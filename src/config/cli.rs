use crate::config::DevToolsConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dev-server")]
#[command(about = "Earth Saver development server: serves the project and opens your browser")]
pub struct ServerArgs {
    /// Path to TOML configuration file (defaults to ./devtools.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project root to serve (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Preferred port, tried before the fallback list
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Do not open a browser tab after startup
    #[arg(long)]
    pub no_open: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServerArgs {
    pub fn apply_to(&self, config: &mut DevToolsConfig) {
        if let Some(root) = &self.root {
            config.set_project_root(root);
        }
        if let Some(port) = self.port {
            config.server.port = port;
            // 手動指定的埠不應同時出現在備用清單
            config.server.fallback_ports.retain(|p| *p != port);
        }
        if self.no_open {
            config.server.open_browser = false;
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "asset-helper")]
#[command(about = "Simple utilities for managing Figma assets")]
pub struct AssetArgs {
    /// One of: validate, organize, status
    pub command: Option<String>,

    /// 多餘的參數直接忽略
    #[arg(trailing_var_arg = true, hide = true)]
    pub extra: Vec<String>,

    /// Path to TOML configuration file (defaults to ./devtools.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project root containing the assets folder (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl AssetArgs {
    pub fn apply_to(&self, config: &mut DevToolsConfig) {
        if let Some(root) = &self.root {
            config.set_project_root(root);
        }
    }
}
