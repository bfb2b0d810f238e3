use riverbed_engine::config::TableConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Table settings as resolved for a CLI session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub small_blind: u32,
    pub big_blind: u32,
    pub buy_in: u32,
    pub seats: usize,
    pub seed: Option<u64>,
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
    pub small_blind: ValueSource,
    pub big_blind: ValueSource,
    pub buy_in: ValueSource,
    pub seats: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            small_blind: ValueSource::Default,
            big_blind: ValueSource::Default,
            buy_in: ValueSource::Default,
            seats: ValueSource::Default,
            seed: ValueSource::Default,
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
        let table = TableConfig::default();
        Self {
            small_blind: table.small_blind,
            big_blind: table.big_blind,
            buy_in: table.buy_in_default,
            seats: 6,
            seed: None,
        }
    }
}

impl Config {
    /// Engine settings for a table with `seats` seats. The minimum buy-in is
    /// twenty big blinds, or the whole buy-in when that is smaller.
    pub fn table_config(&self, seats: usize) -> TableConfig {
        TableConfig {
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            buy_in_default: self.buy_in,
            buy_in_min: self.big_blind.saturating_mul(20).min(self.buy_in),
            max_seats: seats,
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
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves settings from defaults, then the TOML file named by
/// `RIVERBED_CONFIG`, then `RIVERBED_*` variables. Later layers win.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("RIVERBED_CONFIG")
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.small_blind {
            cfg.small_blind = v;
            sources.small_blind = ValueSource::File;
        }
        if let Some(v) = f.big_blind {
            cfg.big_blind = v;
            sources.big_blind = ValueSource::File;
        }
        if let Some(v) = f.buy_in {
            cfg.buy_in = v;
            sources.buy_in = ValueSource::File;
        }
        if let Some(v) = f.seats {
            cfg.seats = v;
            sources.seats = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_number("RIVERBED_SMALL_BLIND")? {
        cfg.small_blind = v;
        sources.small_blind = ValueSource::Env;
    }
    if let Some(v) = env_number("RIVERBED_BIG_BLIND")? {
        cfg.big_blind = v;
        sources.big_blind = ValueSource::Env;
    }
    if let Some(v) = env_number("RIVERBED_BUY_IN")? {
        cfg.buy_in = v;
        sources.buy_in = ValueSource::Env;
    }
    if let Some(v) = env_number("RIVERBED_SEATS")? {
        cfg.seats = v;
        sources.seats = ValueSource::Env;
    }
    if let Some(v) = env_number("RIVERBED_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    small_blind: Option<u32>,
    #[serde(default)]
    big_blind: Option<u32>,
    #[serde(default)]
    buy_in: Option<u32>,
    #[serde(default)]
    seats: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
}

fn env_number<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", key, v))),
        _ => Ok(None),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.table_config(cfg.seats)
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_make_a_valid_table() {
        let cfg = Config::default();
        assert!(validate(&cfg).is_ok());
        let table = cfg.table_config(cfg.seats);
        assert_eq!(table.big_blind, 2);
        assert_eq!(table.buy_in_min, 40);
        assert_eq!(table.max_seats, 6);
    }

    #[test]
    fn minimum_buy_in_never_exceeds_buy_in() {
        let cfg = Config {
            big_blind: 50,
            small_blind: 25,
            buy_in: 300,
            ..Config::default()
        };
        assert_eq!(cfg.table_config(2).buy_in_min, 300);
    }

    #[test]
    fn inverted_blinds_are_invalid() {
        let cfg = Config {
            small_blind: 5,
            big_blind: 2,
            ..Config::default()
        };
        let msg = validate(&cfg).unwrap_err().to_string();
        assert!(msg.contains("Invalid configuration"), "{}", msg);
    }

    #[test]
    fn file_config_accepts_partial_tables() {
        let f: FileConfig = toml::from_str("big_blind = 10\nseats = 9\n").unwrap();
        assert_eq!(f.big_blind, Some(10));
        assert_eq!(f.seats, Some(9));
        assert_eq!(f.seed, None);
    }
}
