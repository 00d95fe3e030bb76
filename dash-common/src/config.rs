//! Configuration loading and root folder resolution
//!
//! Root folder resolution follows this priority order:
//! 1. Command-line argument (highest priority)
//! 2. `DASH_ROOT_FOLDER`, then `DASH_ROOT` environment variables
//! 3. `root_folder` key of the module's TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable TOML file never aborts startup. The loader logs a
//! warning and the compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Primary root folder environment variable
pub const ENV_ROOT_FOLDER: &str = "DASH_ROOT_FOLDER";
/// Alternative root folder environment variable
pub const ENV_ROOT: &str = "DASH_ROOT";

/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "dashboard.db";

/// Default session cookie name
pub const DEFAULT_SESSION_COOKIE: &str = "session_token";

/// Compiled defaults used when no configuration is available
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

/// Logging section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Append logs to this file instead of stdout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let defaults = CompiledDefaults::for_current_platform();
        Self {
            level: defaults.log_level,
            file: defaults.log_file,
        }
    }
}

impl LoggingConfig {
    /// Open the configured log file for appending, creating parent folders
    ///
    /// Returns `Ok(None)` when logging goes to stdout.
    pub fn open_log_file(&self) -> Result<Option<File>> {
        let Some(path) = &self.file else {
            return Ok(None);
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Some(file))
    }
}

fn default_log_level() -> String {
    CompiledDefaults::for_current_platform().log_level
}

/// HTTP listener section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5740
}

/// Session lookup section of the TOML config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cookie carrying the session token
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_cookie_name() -> String {
    DEFAULT_SESSION_COOKIE.to_string()
}

/// Per-module TOML configuration file
///
/// Every section is optional so older files keep parsing as fields are added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl TomlConfig {
    /// Parse a config file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))
    }
}

/// Resolves the root folder and module config for one service
pub struct RootFolderResolver {
    module_name: String,
}

impl RootFolderResolver {
    pub fn new(module_name: &str) -> Self {
        Self {
            module_name: module_name.to_string(),
        }
    }

    /// Resolve the root folder without a command-line override
    pub fn resolve(&self) -> PathBuf {
        self.resolve_with_cli(None)
    }

    /// Resolve the root folder, honouring a command-line override first
    pub fn resolve_with_cli(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            debug!("Root folder from command line: {}", path.display());
            return path.to_path_buf();
        }

        for var in [ENV_ROOT_FOLDER, ENV_ROOT] {
            if let Ok(path) = std::env::var(var) {
                if !path.is_empty() {
                    debug!("Root folder from {}: {}", var, path);
                    return PathBuf::from(path);
                }
            }
        }

        if let Some(root_folder) = self.load_config().root_folder {
            debug!("Root folder from config file: {}", root_folder.display());
            return root_folder;
        }

        CompiledDefaults::for_current_platform().root_folder
    }

    /// Load the module's TOML config, falling back to defaults
    pub fn load_config(&self) -> TomlConfig {
        let Some(path) = self.config_file_path() else {
            return TomlConfig::default();
        };

        match TomlConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring config file {} ({}); using defaults",
                    path.display(),
                    e
                );
                TomlConfig::default()
            }
        }
    }

    /// First existing config file for this module, if any
    fn config_file_path(&self) -> Option<PathBuf> {
        let file_name = format!("{}.toml", self.module_name);

        let user_config = dirs::config_dir().map(|d| d.join("dashboard").join(&file_name));
        let system_config = if cfg!(target_os = "linux") {
            Some(PathBuf::from("/etc/dashboard").join(&file_name))
        } else {
            None
        };

        [user_config, system_config]
            .into_iter()
            .flatten()
            .find(|path| path.exists())
    }
}

/// Prepares the resolved root folder for use
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    /// Create the root folder (and parents) if missing. Idempotent.
    pub fn ensure_directory_exists(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root_folder)?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    pub fn database_exists(&self) -> bool {
        self.database_path().exists()
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/dashboard (or /var/lib/dashboard for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("dashboard"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/dashboard"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("dashboard"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/dashboard"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("dashboard"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\dashboard"))
    } else {
        PathBuf::from("./dashboard_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.server.port, 5740);
        assert_eq!(config.session.cookie_name, "session_token");
    }

    #[test]
    fn test_partial_section_fills_missing_fields() {
        let config: TomlConfig = toml::from_str(
            r#"
            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("dash.log");
        let logging = LoggingConfig {
            level: "debug".to_string(),
            file: Some(path.clone()),
        };

        {
            use std::io::Write;
            let mut first = logging.open_log_file().unwrap().expect("file configured");
            writeln!(first, "one").unwrap();
            let mut second = logging.open_log_file().unwrap().expect("file configured");
            writeln!(second, "two").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_no_log_file_means_stdout() {
        assert!(LoggingConfig::default().open_log_file().unwrap().is_none());
    }
}
