//! Table settings resolved from defaults, a TOML file named by
//! `PARLOR_CONFIG`, then `PARLOR_*` environment variables. Command-line
//! flags are applied by the commands on top of the result.

use parlor_engine::equity::DEFAULT_SAMPLES;
use parlor_engine::game::{BIG_BLIND, SMALL_BLIND};
use serde::{Deserialize, Serialize};
use std::fs;

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub seats: usize,
    pub starting_chips: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub equity_samples: usize,
    pub ai: String,
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
    pub seed: ValueSource,
    pub seats: ValueSource,
    pub starting_chips: ValueSource,
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub equity_samples: ValueSource,
    pub ai: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            seats: ValueSource::Default,
            starting_chips: ValueSource::Default,
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            equity_samples: ValueSource::Default,
            ai: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            seats: 6,
            starting_chips: 1000,
            small_blind: SMALL_BLIND,
            big_blind: BIG_BLIND,
            equity_samples: DEFAULT_SAMPLES,
            ai: "equity".into(),
        }
    }
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
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("PARLOR_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.equity_samples {
            cfg.equity_samples = v;
            sources.equity_samples = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
    }

    if let Some(v) = env_parsed("PARLOR_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_parsed("PARLOR_SEATS")? {
        cfg.seats = v;
        sources.seats = ValueSource::Env;
    }
    if let Some(v) = env_parsed("PARLOR_STARTING_CHIPS")? {
        cfg.starting_chips = v;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(v) = env_parsed("PARLOR_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_parsed("PARLOR_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_parsed("PARLOR_EQUITY_SAMPLES")? {
        cfg.equity_samples = v;
        sources.equity_samples = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var("PARLOR_AI")
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

/// Reads `key` and parses it; unset or empty means `None`.
fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid value for {}: {:?}", key, v))),
        _ => Ok(None),
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    equity_samples: Option<usize>,
    #[serde(default)]
    ai: Option<String>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&cfg.seats) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: seats must be between {} and {}",
            MIN_SEATS, MAX_SEATS
        )));
    }
    if cfg.small_blind == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: small_blind must be >0".into(),
        ));
    }
    if cfg.big_blind < cfg.small_blind {
        return Err(ConfigError::Invalid(
            "Invalid configuration: big_blind must be >= small_blind".into(),
        ));
    }
    if cfg.starting_chips == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: starting_chips must be >0".into(),
        ));
    }
    Ok(())
}
