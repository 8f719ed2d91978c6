use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Arg, ArgMatches, Command};
use serde_json::Value;

use crate::errors::ConfigError;
use crate::services::dispatcher::DEFAULT_SPOIL_TEXT;

pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0:2346";
pub const DEFAULT_SHARE_DIR: &str = "./share";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub listen_host: String,
    pub log_file: Option<PathBuf>,
    pub share_dir: PathBuf,
    pub spoiler_file: Option<PathBuf>,
    pub seed_file: Option<PathBuf>,
}

fn command() -> Command {
    Command::new("bingod")
        .version("1.1")
        .author("Ron Straight <straightre@gmail.com>")
        .about("Word-bingo rule engine and game service")
        .arg(
            Arg::new("listen-host")
                .long("listen-host")
                .num_args(1)
                .default_value(DEFAULT_LISTEN_HOST)
                .help("Specify the listen address (e.g., 0.0.0.0:2346)"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .num_args(1)
                .help("Specify a log file path (if omitted, logs to stderr)"),
        )
        .arg(
            Arg::new("share-dir")
                .long("share-dir")
                .num_args(1)
                .default_value(DEFAULT_SHARE_DIR)
                .help("Directory containing words/ with the dictionary and rule lists"),
        )
        .arg(
            Arg::new("spoiler-file")
                .long("spoiler-file")
                .num_args(1)
                .help("File holding the spoiler text sold for 50 coins"),
        )
        .arg(
            Arg::new("seed-file")
                .long("seed-file")
                .num_args(1)
                .help("JSON object of team name -> stored game state to start from"),
        )
}

impl Config {
    pub fn from_args() -> Self {
        Self::from_matches(&command().get_matches())
    }

    pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Self::from_matches(&command().try_get_matches_from(args)?))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let path = |name: &str| matches.get_one::<String>(name).map(PathBuf::from);
        Config {
            listen_host: matches
                .get_one::<String>("listen-host")
                .cloned()
                .unwrap_or_else(|| DEFAULT_LISTEN_HOST.to_string()),
            log_file: path("log-file"),
            share_dir: path("share-dir").unwrap_or_else(|| PathBuf::from(DEFAULT_SHARE_DIR)),
            spoiler_file: path("spoiler-file"),
            seed_file: path("seed-file"),
        }
    }

    /// The spoiler text, trimmed, or the built-in placeholder. An empty
    /// spoiler would never mark a team as spoiled, so it is refused.
    pub fn spoil_text(&self) -> Result<String, ConfigError> {
        match &self.spoiler_file {
            Some(path) => {
                let text = read(path)?.trim().to_string();
                if text.is_empty() {
                    return Err(ConfigError::EmptySpoiler { path: path.clone() });
                }
                Ok(text)
            }
            None => Ok(DEFAULT_SPOIL_TEXT.to_string()),
        }
    }

    /// Stored team records to preload, empty without a seed file
    pub fn seed(&self) -> Result<BTreeMap<String, Value>, ConfigError> {
        match &self.seed_file {
            Some(path) => serde_json::from_str(&read(path)?).map_err(|source| ConfigError::Seed {
                path: path.clone(),
                source,
            }),
            None => Ok(BTreeMap::new()),
        }
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}
