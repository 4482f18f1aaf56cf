// Configuration loading and parsing (config/draftboard.toml).

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Name of the configuration file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "draftboard.toml";

/// Environment variable overriding `[data] dir`.
pub const DATA_DIR_ENV: &str = "DRAFTBOARD_DATA_DIR";

const MIN_POLL_MS: u64 = 250;
const MAX_POLL_MS: u64 = 60_000;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config file at {path}")]
    FileNotFound { path: PathBuf },

    #[error("invalid TOML in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("config field `{field}` {message}")]
    ValidationError { field: String, message: String },

    #[error("cannot seed config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
    pub websocket: WebsocketConfig,
    pub poll: PollConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Directory relative paths in this config resolve against.
    /// Set by the loader, not read from the file.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Where the two backing documents live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: String,
    pub players_file: String,
    pub state_file: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Snapshot push channel.
#[derive(Debug, Clone, Deserialize)]
pub struct WebsocketConfig {
    pub enabled: bool,
    pub port: u16,
}

/// Server-side poll feeding the push channel.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    pub interval_ms: u64,
}

/// Terminal viewer settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// Retrieval endpoint to poll. When absent the viewer reads the data
    /// files directly.
    #[serde(default)]
    pub server_url: Option<String>,
    #[serde(default = "default_viewer_poll_ms")]
    pub poll_interval_ms: u64,
}

fn default_viewer_poll_ms() -> u64 {
    1500
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            server_url: None,
            poll_interval_ms: default_viewer_poll_ms(),
        }
    }
}

impl Config {
    /// Absolute (or cwd-relative) data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join(&self.data.dir)
    }

    /// `host:port` the HTTP server binds.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// `host:port` the WebSocket push server binds.
    pub fn websocket_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.websocket.port)
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draftboard.toml` relative to `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults
/// and ignores the environment. Prefer `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    let mut config = parse_config(&path, &text)?;
    config.base_dir = base_dir.to_path_buf();
    validate(&config)?;
    Ok(config)
}

/// Parse config text without touching the filesystem. `path` is only used
/// in error messages.
pub fn parse_config(path: &Path, text: &str) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Seed `config/draftboard.toml` from `defaults/` on first run.
///
/// Returns the path written, or `None` when a local config already exists.
/// An existing file is never overwritten.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let template = base_dir.join("defaults").join(CONFIG_FILE);
    let copy_error = |what: &str, path: &Path, e: std::io::Error| ConfigError::DefaultsCopyError {
        message: format!("{what} {}: {e}", path.display()),
    };

    let content = std::fs::read(&template).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::DefaultsCopyError {
                message: format!(
                    "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} under {}; \
                     start from the project root",
                    base_dir.display()
                ),
            }
        } else {
            copy_error("cannot read", &template, e)
        }
    })?;

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| copy_error("cannot create", dir, e))?;
    }

    // create_new: a file that appeared since the check above wins.
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut file) => {
            file.write_all(&content)
                .map_err(|e| copy_error("cannot write", &target, e))?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(copy_error("cannot create", &target, e)),
    }
}

/// Convenience wrapper: loads config relative to the current working directory,
/// copying defaults first and applying `DRAFTBOARD_DATA_DIR`.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    let mut config = load_config_from(&cwd)?;
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        apply_data_dir_override(&mut config, &dir)?;
    }
    Ok(config)
}

/// Replace `[data] dir`, re-validating the result.
pub fn apply_data_dir_override(config: &mut Config, dir: &str) -> Result<(), ConfigError> {
    config.data.dir = dir.to_string();
    validate(config)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let non_empty: &[(&str, &str)] = &[
        ("data.dir", config.data.dir.as_str()),
        ("data.players_file", config.data.players_file.as_str()),
        ("data.state_file", config.data.state_file.as_str()),
        ("server.host", config.server.host.as_str()),
    ];
    for (field, value) in non_empty {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError {
            field: "server.port".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.websocket.enabled {
        if config.websocket.port == 0 {
            return Err(ConfigError::ValidationError {
                field: "websocket.port".into(),
                message: "must be greater than 0".into(),
            });
        }
        if config.websocket.port == config.server.port {
            return Err(ConfigError::ValidationError {
                field: "websocket.port".into(),
                message: format!("must differ from server.port ({})", config.server.port),
            });
        }
    }

    let intervals: &[(&str, u64)] = &[
        ("poll.interval_ms", config.poll.interval_ms),
        ("viewer.poll_interval_ms", config.viewer.poll_interval_ms),
    ];
    for (field, value) in intervals {
        if !(MIN_POLL_MS..=MAX_POLL_MS).contains(value) {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: format!("must be between {MIN_POLL_MS} and {MAX_POLL_MS}, got {value}"),
            });
        }
    }

    if let Some(url) = &config.viewer.server_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::ValidationError {
                field: "viewer.server_url".into(),
                message: format!("must be an http(s) URL, got {url:?}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
