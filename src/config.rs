//! Session configuration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// How long the robot "thinks" before acting, by default.
pub const DEFAULT_BOT_DELAY_MS: u64 = 1000;

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Delay before each robot action, in milliseconds.
    pub bot_delay_ms: u64,
    /// Seed for shuffling. Each new game draws from the same seeded generator, so a sequence of
    /// games is reproducible.
    pub seed: Option<u64>,
    /// Decorate console output with ANSI colors.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_delay_ms: DEFAULT_BOT_DELAY_MS,
            seed: None,
            color: true,
        }
    }
}

impl Config {
    /// Loads a configuration from a JSON file. Missing fields take their default values.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// The robot's delay.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config: Config = serde_json::from_str(r#"{"seed": 5}"#).unwrap();
        assert_eq!(
            config,
            Config {
                seed: Some(5),
                ..Config::default()
            }
        );
        assert_eq!(config.bot_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_unknown_field() {
        assert!(serde_json::from_str::<Config>(r#"{"speed": 5}"#).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/durak.json")).unwrap_err();
        assert!(err.to_string().contains("opening"));
    }
}
