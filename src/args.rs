//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use durak::Config;

#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// JSON configuration file. Flags override its settings.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for shuffling, for reproducible games.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Delay before each robot action, in milliseconds.
    #[arg(short, long)]
    pub bot_delay_ms: Option<u64>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Write the log of the last game to this file, as JSON.
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl Args {
    /// Builds the session configuration.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(delay) = self.bot_delay_ms {
            config.bot_delay_ms = delay;
        }
        if self.no_color {
            config.color = false;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from(["durak", "--seed", "9", "-b", "0", "--no-color"]);
        let config = args.config().unwrap();
        assert_eq!(
            config,
            Config {
                bot_delay_ms: 0,
                seed: Some(9),
                color: false,
            }
        );
    }

    #[test]
    fn test_no_flags() {
        let args = Args::parse_from(["durak"]);
        assert_eq!(args.config().unwrap(), Config::default());
        assert!(args.save.is_none());
    }
}
