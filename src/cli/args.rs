use crate::core::config::CONFIG_FILE_NAME;
use clap::Args;
use std::env;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct PassArgs {
    /// Workspace root that configured directories are resolved against (default: current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Process this directory instead of the one configured for the pass
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Configuration file (default: <PATH>/kgnorm.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl PassArgs {
    pub fn workspace_root(&self) -> PathBuf {
        self.path
            .clone()
            .or_else(|| env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| self.workspace_root().join(CONFIG_FILE_NAME))
    }
}
