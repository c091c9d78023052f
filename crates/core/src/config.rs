use serde::Deserialize;
use serde_yaml_ng::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{error, info, warn};

pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Written to the data directory the first time the plugin loads.
pub const DEFAULT_CONFIG: &str = include_str!("../resources/config.yml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// One parsed `config.yml`. Never mutated after it is built; a reload
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastConfig {
    pub use_legacy_colors: bool,
    pub prefix: String,
    pub title: String,
    pub suffix: String,
    pub prefix_color: String,
    pub title_color: String,
    pub message_color: String,
    pub logging_enabled: bool,
    pub log_format: String,
    pub default_behavior_is_all: bool,
    pub show_server_scope: bool,
    pub scope_permission_only: bool,
    pub scope_format: String,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        BroadcastConfig {
            use_legacy_colors: false,
            prefix: "» ".to_string(),
            title: "Broadcast".to_string(),
            suffix: " « ".to_string(),
            prefix_color: "<gold>".to_string(),
            title_color: "<yellow>".to_string(),
            message_color: "<gray>".to_string(),
            logging_enabled: false,
            log_format: "[%date%] %player%: %message%".to_string(),
            default_behavior_is_all: true,
            show_server_scope: true,
            scope_permission_only: false,
            scope_format: "<gray>(Sent to: %servers%)".to_string(),
        }
    }
}

impl BroadcastConfig {
    /// Missing sections, missing keys and keys left blank fall back to their
    /// defaults. Scalars are coerced: numbers and booleans read as strings,
    /// `"true"`/`"false"` read as booleans.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml_ng::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml_ng::from_str(source)?;
        Ok(raw.into())
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    format: Option<FormatSection>,
    logging: Option<LoggingSection>,
    targeting: Option<TargetingSection>,
}

// Keys are kept as raw values so that blank and mistyped entries fall back
// per key instead of failing the whole file.
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
struct FormatSection {
    use_legacy_colors: Option<Value>,
    prefix: Option<Value>,
    title: Option<Value>,
    suffix: Option<Value>,
    prefix_color: Option<Value>,
    title_color: Option<Value>,
    message_color: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct LoggingSection {
    enabled: Option<Value>,
    format: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TargetingSection {
    default_behavior: Option<Value>,
    show_server_scope: Option<Value>,
    scope_permission_only: Option<Value>,
    scope_format: Option<Value>,
}

fn string_or(value: Option<Value>, key: &str, default: String) -> String {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::String(s)) => s,
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            warn!("Ignoring {}: expected a string, found {:?}", key, other);
            default
        }
    }
}

fn bool_or(value: Option<Value>, key: &str, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("true") => true,
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("false") => false,
        Some(other) => {
            warn!("Ignoring {}: expected true or false, found {:?}", key, other);
            default
        }
    }
}

impl From<RawConfig> for BroadcastConfig {
    fn from(raw: RawConfig) -> Self {
        let defaults = BroadcastConfig::default();
        let format = raw.format.unwrap_or_default();
        let logging = raw.logging.unwrap_or_default();
        let targeting = raw.targeting.unwrap_or_default();

        let default_behavior = string_or(
            targeting.default_behavior,
            "targeting.default_behavior",
            "all".to_string(),
        );

        BroadcastConfig {
            use_legacy_colors: bool_or(
                format.use_legacy_colors,
                "format.use-legacy-colors",
                defaults.use_legacy_colors,
            ),
            prefix: string_or(format.prefix, "format.prefix", defaults.prefix),
            title: string_or(format.title, "format.title", defaults.title),
            suffix: string_or(format.suffix, "format.suffix", defaults.suffix),
            prefix_color: string_or(
                format.prefix_color,
                "format.prefix-color",
                defaults.prefix_color,
            ),
            title_color: string_or(format.title_color, "format.title-color", defaults.title_color),
            message_color: string_or(
                format.message_color,
                "format.message-color",
                defaults.message_color,
            ),
            logging_enabled: bool_or(logging.enabled, "logging.enabled", defaults.logging_enabled),
            log_format: string_or(logging.format, "logging.format", defaults.log_format),
            default_behavior_is_all: default_behavior.eq_ignore_ascii_case("all"),
            show_server_scope: bool_or(
                targeting.show_server_scope,
                "targeting.show_server_scope",
                defaults.show_server_scope,
            ),
            scope_permission_only: bool_or(
                targeting.scope_permission_only,
                "targeting.scope_permission_only",
                defaults.scope_permission_only,
            ),
            scope_format: string_or(
                targeting.scope_format,
                "targeting.scope_format",
                defaults.scope_format,
            ),
        }
    }
}

/// Owns the current [`BroadcastConfig`] snapshot for a plugin data directory.
///
/// Readers take an `Arc` to the snapshot; [`ConfigStore::reload`] swaps in a
/// fully built replacement, so a reader sees either the old or the new
/// configuration and never a mix.
pub struct ConfigStore {
    data_directory: PathBuf,
    config_path: PathBuf,
    current: RwLock<Arc<BroadcastConfig>>,
}

impl ConfigStore {
    /// Loads `config.yml` from `data_directory`, creating it if needed.
    /// Falls back to the defaults if the file can not be loaded.
    pub fn open(data_directory: impl Into<PathBuf>) -> ConfigStore {
        let data_directory = data_directory.into();
        let config_path = data_directory.join(CONFIG_FILE_NAME);
        let store = ConfigStore {
            data_directory,
            config_path,
            current: RwLock::new(Arc::new(BroadcastConfig::default())),
        };
        if let Err(err) = store.reload() {
            error!("Using default configuration: {}", err);
        }
        store
    }

    pub fn data_directory(&self) -> &Path {
        &self.data_directory
    }

    pub fn snapshot(&self) -> Arc<BroadcastConfig> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Re-reads the file and installs the new snapshot. On error the
    /// previous snapshot stays in place.
    pub fn reload(&self) -> Result<Arc<BroadcastConfig>, ConfigError> {
        let config = Arc::new(self.load_from_disk()?);
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config.clone();
        Ok(config)
    }

    fn load_from_disk(&self) -> Result<BroadcastConfig, ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.config_path.clone(),
            source,
        };

        fs::create_dir_all(&self.data_directory).map_err(io_err)?;
        if !self.config_path.exists() {
            fs::write(&self.config_path, DEFAULT_CONFIG).map_err(io_err)?;
            info!("Created default config at {}", self.config_path.display());
        }

        let source = fs::read_to_string(&self.config_path).map_err(io_err)?;
        BroadcastConfig::from_yaml(&source).map_err(|source| ConfigError::Parse {
            path: self.config_path.clone(),
            source,
        })
    }
}
