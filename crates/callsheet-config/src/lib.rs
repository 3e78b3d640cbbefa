use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use callsheet_core::domain::{normalize_country_code, DEFAULT_COUNTRY_CODE};
use callsheet_core::{CommandDialer, Dialer, LogDialer};
use serde::Deserialize;
use thiserror::Error;

pub mod seed;

pub use seed::{load_roster, load_seed};

const APP_DIR: &str = "callsheet";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub default_country_code: String,
    pub seed_path: Option<PathBuf>,
    pub dialer: DialerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialerConfig {
    pub enabled: bool,
    pub command: Option<String>,
    pub args: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            seed_path: None,
            dialer: DialerConfig {
                enabled: true,
                command: None,
                args: Vec::new(),
            },
        }
    }
}

impl DialerConfig {
    pub fn build(&self) -> Box<dyn Dialer> {
        if !self.enabled {
            return Box::new(LogDialer::new());
        }
        match &self.command {
            Some(command) => Box::new(CommandDialer::new(command.clone(), self.args.clone())),
            None => Box::new(CommandDialer::platform_default()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid default_country_code value: {0}")]
    InvalidCountryCode(String),
    #[error("invalid dialer command: {0:?}")]
    InvalidDialerCommand(String),
    #[error("seed file not found: {0}")]
    MissingSeedFile(PathBuf),
    #[error("invalid seed entry #{index} in {path}: {reason}")]
    InvalidSeed {
        path: PathBuf,
        index: usize,
        reason: String,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    default_country_code: Option<String>,
    seed_path: Option<PathBuf>,
    dialer: Option<DialerFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DialerFile {
    enabled: Option<bool>,
    command: Option<String>,
    args: Option<Vec<String>>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed, path.parent())?))
}

fn merge_config(parsed: ConfigFile, config_dir: Option<&Path>) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(code) = parsed.default_country_code {
        config.default_country_code =
            normalize_country_code(&code).map_err(|_| ConfigError::InvalidCountryCode(code))?;
    }

    if let Some(seed_path) = parsed.seed_path {
        // Relative seed paths are anchored at the config file's directory.
        let resolved = match config_dir {
            Some(dir) if seed_path.is_relative() => dir.join(seed_path),
            _ => seed_path,
        };
        config.seed_path = Some(resolved);
    }

    if let Some(dialer) = parsed.dialer {
        if let Some(enabled) = dialer.enabled {
            config.dialer.enabled = enabled;
        }
        if let Some(command) = dialer.command {
            if command.trim().is_empty() {
                return Err(ConfigError::InvalidDialerCommand(command));
            }
            config.dialer.command = Some(command.trim().to_string());
        }
        if let Some(args) = dialer.args {
            config.dialer.args = args;
        }
    }

    Ok(config)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
