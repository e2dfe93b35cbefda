use clinote_engine::config::{EngineConfig, LexiconError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to read lexicon at {lexicon_path}: {source}")]
    LexiconReadError {
        lexicon_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse lexicon at {lexicon_path}: {source}")]
    LexiconParseError {
        lexicon_path: PathBuf,
        source: LexiconError,
    },

    #[error("Bundled lexicon is invalid: {0}")]
    BuiltinLexiconError(#[from] LexiconError),
}

/// User settings. Anything left out falls back to the bundled lexicon and
/// the engine defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_debounce_ms: Option<u64>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the lexicon path
        config.lexicon_path = config
            .lexicon_path
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/clinote");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Resolve the lexicon and apply the overrides from this config.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let mut engine = match &self.lexicon_path {
            Some(lexicon_path) => Self::load_lexicon(lexicon_path)?,
            None => EngineConfig::builtin()?,
        };
        if let Some(threshold) = self.fuzzy_threshold {
            engine.fuzzy_threshold = threshold;
        }
        if let Some(debounce) = self.task_debounce_ms {
            engine.task_debounce_ms = debounce;
        }
        Ok(engine)
    }

    fn load_lexicon(lexicon_path: &Path) -> Result<EngineConfig, ConfigError> {
        let content = std::fs::read_to_string(lexicon_path).map_err(|source| {
            ConfigError::LexiconReadError {
                lexicon_path: lexicon_path.to_path_buf(),
                source,
            }
        })?;
        EngineConfig::from_toml_str(&content).map_err(|source| ConfigError::LexiconParseError {
            lexicon_path: lexicon_path.to_path_buf(),
            source,
        })
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
