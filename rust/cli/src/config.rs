//! Simulation defaults resolved from a TOML file and environment variables.
//!
//! Precedence, lowest first: built-in defaults, the file named by
//! `HANDSIM_CONFIG`, `HANDSIM_*` environment variables. Request files and
//! command-line flags are layered on top by the commands themselves.

use serde::{Deserialize, Serialize};
use std::fs;

use handsim_engine::deck::DEFAULT_MAX_COPIES;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub trials: u64,
    pub hand_size: usize,
    pub max_copies: usize,
    pub seed: Option<u64>,
    pub exclusive: bool,
    pub parallel: bool,
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
    pub trials: ValueSource,
    pub hand_size: ValueSource,
    pub max_copies: ValueSource,
    pub seed: ValueSource,
    pub exclusive: ValueSource,
    pub parallel: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            trials: ValueSource::Default,
            hand_size: ValueSource::Default,
            max_copies: ValueSource::Default,
            seed: ValueSource::Default,
            exclusive: ValueSource::Default,
            parallel: ValueSource::Default,
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
            trials: 10_000,
            hand_size: 5,
            max_copies: DEFAULT_MAX_COPIES,
            seed: None,
            exclusive: false,
            parallel: false,
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

    if let Ok(path) = std::env::var("HANDSIM_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.trials {
            cfg.trials = v;
            sources.trials = ValueSource::File;
        }
        if let Some(v) = f.hand_size {
            cfg.hand_size = v;
            sources.hand_size = ValueSource::File;
        }
        if let Some(v) = f.max_copies {
            cfg.max_copies = v;
            sources.max_copies = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.exclusive {
            cfg.exclusive = v;
            sources.exclusive = ValueSource::File;
        }
        if let Some(v) = f.parallel {
            cfg.parallel = v;
            sources.parallel = ValueSource::File;
        }
    }

    if let Some(v) = env_parsed("HANDSIM_TRIALS", str::parse::<u64>)? {
        cfg.trials = v;
        sources.trials = ValueSource::Env;
    }
    if let Some(v) = env_parsed("HANDSIM_HAND_SIZE", str::parse::<usize>)? {
        cfg.hand_size = v;
        sources.hand_size = ValueSource::Env;
    }
    if let Some(v) = env_parsed("HANDSIM_MAX_COPIES", str::parse::<usize>)? {
        cfg.max_copies = v;
        sources.max_copies = ValueSource::Env;
    }
    if let Some(v) = env_parsed("HANDSIM_SEED", str::parse::<u64>)? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_parsed("HANDSIM_EXCLUSIVE", parse_bool)? {
        cfg.exclusive = v;
        sources.exclusive = ValueSource::Env;
    }
    if let Some(v) = env_parsed("HANDSIM_PARALLEL", parse_bool)? {
        cfg.parallel = v;
        sources.parallel = ValueSource::Env;
    }

    validate(&cfg)?;
    tracing::debug!(?cfg, "configuration resolved");
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    trials: Option<u64>,
    #[serde(default)]
    hand_size: Option<usize>,
    #[serde(default)]
    max_copies: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    exclusive: Option<bool>,
    #[serde(default)]
    parallel: Option<bool>,
}

/// Read and parse an env var; unset or empty yields `None`.
fn env_parsed<T, E>(
    name: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => parse(raw.trim())
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid value for {}: {}", name, raw))),
        _ => Ok(None),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.trials == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: trials must be >=1".into(),
        ));
    }
    if cfg.max_copies == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: max_copies must be >=1".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Result<bool, ()> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("YES"), Ok(true));
        assert_eq!(parse_bool("off"), Ok(false));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn zero_trials_rejected() {
        let cfg = Config {
            trials: 0,
            ..Config::default()
        };
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("trials"));
    }

    #[test]
    fn file_config_rejects_unknown_keys() {
        assert!(toml::from_str::<FileConfig>("trials = 5\nlevel = 2\n").is_err());
        let f: FileConfig = toml::from_str("trials = 5\nexclusive = true\n").unwrap();
        assert_eq!(f.trials, Some(5));
        assert_eq!(f.exclusive, Some(true));
    }
}
