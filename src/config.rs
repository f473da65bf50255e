//! Runtime configuration
//!
//! Values come from the environment and can be overridden by command-line
//! flags. Relative data paths are resolved against the current directory.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{ArchiveError, ArchiveResult};

pub const DATA_FILE_ENV: &str = "ARCHIVE_DATA_FILE";
pub const HOST_ENV: &str = "ARCHIVE_HOST";
pub const PORT_ENV: &str = "ARCHIVE_PORT";

pub const DEFAULT_DATA_FILE: &str = "archive.jsonl";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Absolute path of the JSON-lines archive
    pub data_file: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            data_file: resolve_path(DEFAULT_DATA_FILE),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ArchiveConfig {
    /// Read configuration from `ARCHIVE_*` variables, falling back to defaults
    pub fn from_env() -> ArchiveResult<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var(DATA_FILE_ENV) {
            config.data_file = resolve_path(&path);
        }
        if let Ok(host) = env::var(HOST_ENV) {
            config.host = host;
        }
        if let Ok(port) = env::var(PORT_ENV) {
            config.port = port.parse().map_err(|_| {
                ArchiveError::validation(PORT_ENV, format!("'{}' is not a valid port", port))
            })?;
        }

        Ok(config)
    }

    pub fn with_data_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_file = resolve_path(path);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Socket address for the HTTP server
    pub fn bind_addr(&self) -> ArchiveResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ArchiveError::validation(
                    "host",
                    format!("'{}:{}' is not a valid address", self.host, self.port),
                )
            })
    }
}

fn resolve_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    current_dir.join(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArchiveConfig::default();
        assert!(config.data_file.is_absolute());
        assert!(config.data_file.ends_with(DEFAULT_DATA_FILE));
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_overrides() {
        let config = ArchiveConfig::default()
            .with_data_file("/tmp/heaven.jsonl")
            .with_host("127.0.0.1")
            .with_port(9100);
        assert_eq!(config.data_file, PathBuf::from("/tmp/heaven.jsonl"));
        assert_eq!(config.bind_addr().unwrap().port(), 9100);
    }

    #[test]
    fn test_relative_path_is_resolved() {
        let config = ArchiveConfig::default().with_data_file("data/archive.jsonl");
        assert!(config.data_file.is_absolute());
        assert!(config.data_file.ends_with("data/archive.jsonl"));
    }

    #[test]
    fn test_bad_host() {
        let config = ArchiveConfig::default().with_host("not a host");
        assert!(config.bind_addr().is_err());
    }
}
