use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::grid::Tag;
use crate::pursuit::Metric;

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub pursuit: PursuitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct MazeConfig {
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_cols")]
    pub cols: i32,
    /// Fixed seed for reproducible mazes; random when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct PursuitConfig {
    #[serde(default = "default_mover")]
    pub mover: Tag,
    #[serde(default = "default_target")]
    pub target: Tag,
    #[serde(default = "default_metric")]
    pub metric: Metric,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
    /// Print the action log with durations to stderr on exit
    #[serde(default)]
    pub trace: bool,
}

// Default values
fn default_rows() -> i32 { 10 }
fn default_cols() -> i32 { 10 }
fn default_mover() -> Tag { Tag::Pursuer }
fn default_target() -> Tag { Tag::Target }
fn default_metric() -> Metric { Metric::Path }
fn default_enable_action_log() -> bool { false }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            seed: None,
        }
    }
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            mover: default_mover(),
            target: default_target(),
            metric: default_metric(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
            trace: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            pursuit: PursuitConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if the file doesn't exist
    pub fn load() -> Self {
        if !Path::new("config.toml").exists() {
            return Config::default();
        }
        match Self::load_from("config.toml") {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}", e);
                eprintln!("Using default configuration");
                Config::default()
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::parse(&contents).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
