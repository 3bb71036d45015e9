//! Layered configuration: defaults, then the TOML file named by
//! `SEATREAD_CONFIG`, then `SEATREAD_*` environment variables.

use seatread_engine::prompt::DEFAULT_PLAY_STYLE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const CONFIG_ENV: &str = "SEATREAD_CONFIG";
pub const PLAY_STYLE_ENV: &str = "SEATREAD_PLAY_STYLE";
pub const PROMPT_LOG_ENV: &str = "SEATREAD_PROMPT_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Framing line placed in the header of first prompts
    pub play_style: String,
    /// JSONL file rendered prompts are appended to
    pub prompt_log: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            play_style: DEFAULT_PLAY_STYLE.into(),
            prompt_log: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub play_style: ValueSource,
    pub prompt_log: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            play_style: ValueSource::Default,
            prompt_log: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {e}"),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {e}"),
            ConfigError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.play_style {
            cfg.play_style = v;
            sources.play_style = ValueSource::File;
        }
        if let Some(v) = f.prompt_log {
            cfg.prompt_log = Some(v);
            sources.prompt_log = ValueSource::File;
        }
    }

    if let Ok(style) = std::env::var(PLAY_STYLE_ENV)
        && !style.is_empty()
    {
        cfg.play_style = style;
        sources.play_style = ValueSource::Env;
    }
    if let Ok(path) = std::env::var(PROMPT_LOG_ENV)
        && !path.is_empty()
    {
        cfg.prompt_log = Some(PathBuf::from(path));
        sources.prompt_log = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    play_style: Option<String>,
    #[serde(default)]
    prompt_log: Option<PathBuf>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.play_style.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "Invalid configuration: play_style must not be blank".into(),
        ));
    }
    Ok(())
}
