use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::Path, result::Result as StdResult, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields, default)]
pub struct BridgeConfig {
    pub log: LogConfig,
    pub dispatcher: DispatcherConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LogConfig {
    /// Android log tag, also passed to managed log handlers.
    pub tag: String,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            tag: "mediasoupclient-jni".to_string(),
            level: "debug".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Debug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DispatcherConfig {
    pub thread_name: String,
    pub worker_threads: usize,
    pub max_blocking_threads: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            thread_name: "msc-dispatch".to_string(),
            worker_threads: 1,
            max_blocking_threads: 64,
        }
    }
}

impl FromStr for BridgeConfig {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl fmt::Display for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        toml::to_string_pretty(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| write!(f, "{}", s))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> anyhow::Result<BridgeConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read bridge config {}", path.display()))?;
    content
        .parse::<BridgeConfig>()
        .with_context(|| format!("failed to parse bridge config {}", path.display()))
}
