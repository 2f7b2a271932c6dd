//! Server configuration from flags and environment.

use clap::Parser;
use habits_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "habits-server")]
#[command(about = "Multi-tenant habit tracking HTTP API")]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "HABITS_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,
    /// SQLite database file; `:memory:` keeps data in process memory.
    #[arg(long, env = "HABITS_DB", default_value = "./habits.sqlite3")]
    pub db: PathBuf,
    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "HABITS_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Directory for rotated log files; stderr when unset.
    #[arg(long, env = "HABITS_LOG_DIR")]
    pub log_dir: Option<String>,
    /// Header carrying the verified session subject.
    #[arg(long, env = "HABITS_TENANT_HEADER", default_value = "x-user-id")]
    pub tenant_header: String,
}

impl ServerConfig {
    pub fn log_level(&self) -> &str {
        match self.log_level.as_deref() {
            Some(level) => level,
            None => default_log_level(),
        }
    }
}
